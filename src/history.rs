//! History manifest loading and snapshot reconciliation

use crate::error::{PainelError, Result};
use crate::fetch::Client;
use crate::filter::StatusFilter;
use crate::record::{ChangeKind, DiffEntry, Record, Snapshot, SnapshotIndex, CALLED_STATUS};

/// Resource path of the history manifest
pub const DIFF_INDEX_RESOURCE: &str = "diff_index.json";

/// Directory holding the per-snapshot CSV files
pub const DIFFS_DIR: &str = "diffs";

/// How much of the history is currently materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    NoneLoaded,
    SingleLoaded,
    AllLoaded,
}

/// Opaque token tying an in-flight load to the request that started it.
/// Results from superseded loads are discarded on apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

/// The loaded portion of the snapshot history, newest first.
#[derive(Debug, Default)]
pub struct History {
    index: Vec<DiffEntry>,
    loaded: Vec<Snapshot>,
    generation: u64,
}

impl History {
    /// Fetches the manifest and keeps its entries sorted by date,
    /// newest first. An empty manifest is a valid empty state.
    pub fn load_index(&mut self, client: &Client) -> Result<()> {
        let manifest: SnapshotIndex = client.load_json(DIFF_INDEX_RESOURCE)?;
        self.index = manifest.diffs;
        self.index.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(())
    }

    pub fn index(&self) -> &[DiffEntry] {
        &self.index
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn latest(&self) -> Option<&DiffEntry> {
        self.index.first()
    }

    /// Finds a manifest entry by file name or by date.
    pub fn find_entry(&self, name: &str) -> Result<&DiffEntry> {
        self.index
            .iter()
            .find(|entry| entry.file == name || entry.date == name)
            .ok_or_else(|| PainelError::snapshot_not_found(name))
    }

    pub fn loaded(&self) -> &[Snapshot] {
        &self.loaded
    }

    pub fn state(&self) -> HistoryState {
        match self.loaded.len() {
            0 => HistoryState::NoneLoaded,
            1 => HistoryState::SingleLoaded,
            _ => HistoryState::AllLoaded,
        }
    }

    /// Starts a new load, invalidating the results of any load still in
    /// flight.
    pub fn begin_load(&mut self) -> LoadToken {
        self.generation += 1;
        LoadToken(self.generation)
    }

    /// Fetches and parses one snapshot file.
    pub fn fetch_single(&self, client: &Client, entry: &DiffEntry) -> Result<Snapshot> {
        let resource = format!("{}/{}", DIFFS_DIR, entry.file);
        let set = client.load_records(&resource)?;
        Ok(Snapshot {
            date: entry.date.clone(),
            file: entry.file.clone(),
            events: entry.events,
            records: set.records,
        })
    }

    /// Installs a single-snapshot result. Returns false and discards
    /// the snapshot when the token has been superseded.
    pub fn apply_single(&mut self, token: LoadToken, snapshot: Snapshot) -> bool {
        if token.0 != self.generation {
            log::debug!("discarding stale load of {}", snapshot.file);
            return false;
        }
        self.loaded = vec![snapshot];
        true
    }

    /// Fetches every snapshot in the manifest, newest first, aborting
    /// at the first failure so the view never shows a partial history
    /// as if it were complete. `on_progress` is called before each
    /// fetch with the zero-based position.
    pub fn fetch_all<F>(&self, client: &Client, mut on_progress: F) -> Result<Vec<Snapshot>>
    where
        F: FnMut(usize, &DiffEntry),
    {
        let mut snapshots = Vec::with_capacity(self.index.len());
        for (pos, entry) in self.index.iter().enumerate() {
            on_progress(pos, entry);
            snapshots.push(self.fetch_single(client, entry)?);
        }
        Ok(snapshots)
    }

    /// Installs a full-history result, subject to the same staleness
    /// check as [`apply_single`](Self::apply_single).
    pub fn apply_all(&mut self, token: LoadToken, snapshots: Vec<Snapshot>) -> bool {
        if token.0 != self.generation {
            log::debug!("discarding stale full-history load");
            return false;
        }
        self.loaded = snapshots;
        true
    }

    /// Loaded snapshots with their records filtered, skipping snapshots
    /// where nothing matches.
    pub fn filtered_groups<'a>(
        &'a self,
        filter: &StatusFilter,
    ) -> Vec<(&'a Snapshot, Vec<&'a Record>)> {
        self.loaded
            .iter()
            .filter_map(|snapshot| {
                let matching: Vec<&Record> = snapshot
                    .records
                    .iter()
                    .filter(|r| filter.matches(r))
                    .collect();
                if matching.is_empty() {
                    None
                } else {
                    Some((snapshot, matching))
                }
            })
            .collect()
    }
}

/// Picks the filter a fresh view should start with, from the most
/// recent snapshot's records: newly called-up records if any exist,
/// otherwise changed called-up records if any exist, otherwise all.
pub fn default_filter(records: &[Record]) -> StatusFilter {
    let has_called_new = records
        .iter()
        .any(|r| r.status() == CALLED_STATUS && r.classification() == ChangeKind::New);
    if has_called_new {
        return StatusFilter::CalledNew;
    }
    let has_called_changed = records
        .iter()
        .any(|r| r.status() == CALLED_STATUS && r.classification() != ChangeKind::New);
    if has_called_changed {
        return StatusFilter::CalledChanged;
    }
    StatusFilter::All
}
