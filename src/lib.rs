//! # painel
//!
//! A hiring-pipeline snapshot reporting engine: fetches published CSV and
//! JSON data over HTTP, reconciles the snapshot history, and serves
//! filtered, searched and sorted views of it.

pub mod cli;
pub mod error;
pub mod fetch;
pub mod record;
pub mod labels;
pub mod history;
pub mod filter;
pub mod sort;
pub mod stats;
pub mod state;
pub mod commands;
pub mod output;
pub mod progress;

pub use error::{PainelError, Result};
pub use fetch::Client;
pub use history::History;

/// Default base URL of the published data directory
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/data";
