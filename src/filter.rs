//! Status filtering and accent-insensitive search

use std::fmt;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::record::{ChangeKind, Record, CALLED_STATUS, ID_COLUMN, NAME_COLUMN};

/// Filter token matching every record
pub const ALL_TOKEN: &str = "__ALL__";

/// Filter token for called-up records that are new in the latest snapshot
pub const CALLED_NEW_TOKEN: &str = "CONVOCADO_NOVO";

/// Filter token for called-up records that changed in the latest snapshot
pub const CALLED_CHANGED_TOKEN: &str = "CONVOCADO_ALTERADO";

/// Status filter applied uniformly across all loaded snapshots.
///
/// The two composite categories intersect the "Convocado" status with
/// the record's change classification; every other token is an exact
/// status match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    CalledNew,
    CalledChanged,
    Status(String),
}

impl StatusFilter {
    pub fn from_token(token: &str) -> Self {
        match token {
            ALL_TOKEN => Self::All,
            CALLED_NEW_TOKEN => Self::CalledNew,
            CALLED_CHANGED_TOKEN => Self::CalledChanged,
            other => Self::Status(other.to_string()),
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Self::All => ALL_TOKEN,
            Self::CalledNew => CALLED_NEW_TOKEN,
            Self::CalledChanged => CALLED_CHANGED_TOKEN,
            Self::Status(status) => status,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::CalledNew => {
                record.status() == CALLED_STATUS && record.classification() == ChangeKind::New
            }
            Self::CalledChanged => {
                record.status() == CALLED_STATUS && record.classification() != ChangeKind::New
            }
            Self::Status(status) => record.status() == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Case- and accent-insensitive fold: NFD decomposition, combining
/// marks stripped, then lowercased. "João" and "joao" fold equal.
pub fn fold(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Free-text search over records. An all-digit term matches as a
/// substring of the id column; anything else matches as a folded
/// substring of the name column.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    id_column: String,
    name_column: String,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self {
            id_column: ID_COLUMN.to_string(),
            name_column: NAME_COLUMN.to_string(),
        }
    }
}

impl SearchEngine {
    pub fn with_columns(id_column: impl Into<String>, name_column: impl Into<String>) -> Self {
        Self {
            id_column: id_column.into(),
            name_column: name_column.into(),
        }
    }

    /// Whether one record matches the term. Blank terms match nothing;
    /// an empty search box means "no search", and the caller decides
    /// what the unfiltered view shows.
    pub fn matches(&self, record: &Record, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }
        if term.chars().all(|c| c.is_ascii_digit()) {
            record.get(&self.id_column).contains(term)
        } else {
            fold(record.get(&self.name_column)).contains(&fold(term))
        }
    }

    pub fn search<'a>(&self, records: &'a [Record], term: &str) -> Vec<&'a Record> {
        records.iter().filter(|r| self.matches(r, term)).collect()
    }
}
