//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter for multi-snapshot fetches
#[derive(Debug)]
pub struct ProgressReporter {
    pub fetch_pb: Option<ProgressBar>,
    total: u64,
    show_progress: bool,
}

impl ProgressReporter {
    /// Create progress reporter for a full-history fetch
    pub fn new_for_history(total: u64) -> Self {
        Self {
            fetch_pb: None,
            total,
            show_progress: true,
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self {
            fetch_pb: None,
            total: 0,
            show_progress: false,
        }
    }

    /// Lazily create the fetch progress bar when needed
    fn ensure_fetch_pb(&mut self) {
        if self.show_progress && self.fetch_pb.is_none() {
            self.fetch_pb = Some(create_progress_bar(self.total, "Fetching snapshots"));
        }
    }

    /// Update fetch progress
    pub fn update_fetch(&mut self, processed: u64, message: &str) {
        self.ensure_fetch_pb();
        if let Some(pb) = &self.fetch_pb {
            pb.set_position(processed);
            pb.set_message(message.to_string());
        }
    }

    /// Finish the fetch
    pub fn finish_fetch(&mut self, message: &str) {
        if let Some(pb) = self.fetch_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        // Ensure the progress bar is cleaned up silently
        if let Some(pb) = self.fetch_pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a progress bar with known total
fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}/{len:3} {msg}")
            .expect("Invalid progress template")
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
