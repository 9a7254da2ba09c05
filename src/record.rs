//! Record and snapshot data model

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column carrying the pre-computed change event for each record
pub const EVENT_COLUMN: &str = "EVENTO";

/// Column carrying the pipeline status for each record
pub const STATUS_COLUMN: &str = "STATUS";

/// Column carrying the numeric option identifier
pub const ID_COLUMN: &str = "OPÇÃO";

/// Column carrying the candidate name
pub const NAME_COLUMN: &str = "NOME";

/// Column carrying the role description
pub const ROLE_COLUMN: &str = "CARGO";

/// Column carrying the event date in detail tables
pub const DATE_COLUMN: &str = "DATE";

/// Status value meaning "called up" for a position
pub const CALLED_STATUS: &str = "Convocado";

/// One parsed row: an ordered mapping from column name to string value.
/// Columns are not typed; numeric and date values are parsed on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, String>);

impl Record {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Build a record from column/value pairs, preserving order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    /// Value of a column; absent columns read as the empty string.
    pub fn get(&self, column: &str) -> &str {
        self.0.get(column).map(String::as_str).unwrap_or("")
    }

    /// Value at a positional column index; out-of-range reads as empty.
    pub fn value_at(&self, index: usize) -> &str {
        self.0
            .get_index(index)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Trimmed status value.
    pub fn status(&self) -> &str {
        self.get(STATUS_COLUMN).trim()
    }

    /// Change classification derived from the event column.
    pub fn classification(&self) -> ChangeKind {
        ChangeKind::from_event(self.get(EVENT_COLUMN))
    }
}

/// Per-record change classification, pre-computed upstream and delivered
/// as the event column. Unknown or absent tokens classify as
/// `Unclassified` and match no filter category except "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    New,
    Changed,
    Removed,
    Unchanged,
    Unclassified,
}

impl ChangeKind {
    /// Case-folds the raw event value and maps the four known tokens.
    pub fn from_event(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "NOVO" => Self::New,
            "ALTERADO" => Self::Changed,
            "REMOVIDO" => Self::Removed,
            "INALTERADO" => Self::Unchanged,
            _ => Self::Unclassified,
        }
    }

    /// Single-character marker used by the pretty printer.
    pub fn marker(&self) -> Option<char> {
        match self {
            Self::New => Some('+'),
            Self::Changed => Some('~'),
            Self::Removed => Some('-'),
            Self::Unchanged | Self::Unclassified => None,
        }
    }
}

/// Records parsed from one CSV payload, plus the optional LAST_UPDATE
/// sentinel consumed before the real header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
    pub last_update: Option<String>,
}

impl RecordSet {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// One entry of the history manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub file: String,
    pub date: String,
    #[serde(default)]
    pub events: u64,
}

/// History manifest: `{ "diffs": [ {file, date, events}, ... ] }`.
/// The single source of truth for which snapshot files are loadable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotIndex {
    #[serde(default)]
    pub diffs: Vec<DiffEntry>,
}

/// One dated extraction of pipeline records, identified by filename.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub date: String,
    pub file: String,
    pub events: u64,
    pub records: Vec<Record>,
}
