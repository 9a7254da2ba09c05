//! Column sorting with numeric-aware, collation-aware comparison

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::filter::fold;
use crate::record::{Record, DATE_COLUMN, NAME_COLUMN, ROLE_COLUMN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl Default for SortDirection {
    fn default() -> Self {
        Self::Ascending
    }
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Current sort of an interactive table: which column, which way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<usize>,
    pub direction: SortDirection,
}

impl SortState {
    /// Clicking the active column flips its direction; clicking a new
    /// column selects it ascending.
    pub fn toggle(&mut self, column: usize) {
        if self.column == Some(column) {
            self.direction = self.direction.flip();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Strict numeric parse with decimal-comma tolerance. Anything that is
/// not entirely a finite number reads as non-numeric, unlike lenient
/// prefix parsers.
fn parse_numeric(cell: &str) -> Option<f64> {
    let normalized = cell.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Compares two cells: numerically when both parse as finite numbers,
/// otherwise by folded text with the raw text as tie-break.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (parse_numeric(a), parse_numeric(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => compare_collated(a, b),
    }
}

/// Accent- and case-insensitive text comparison; equal folds fall back
/// to the raw bytes so the order stays deterministic.
pub fn compare_collated(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

/// Stable in-place sort by the state's column; no column means no
/// reordering, preserving the upstream row order.
pub fn sort_rows(records: &mut [Record], state: &SortState) {
    let Some(column) = state.column else {
        return;
    };
    records.sort_by(|a, b| {
        let ordering = compare_cells(a.value_at(column), b.value_at(column));
        match state.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell.trim(), "%Y-%m-%d").ok()
}

/// Fixed ordering for period detail rows: date ascending with undated
/// rows first, then role, then name.
pub fn sort_detail_rows(records: &mut [Record]) {
    records.sort_by(|a, b| {
        let date_a = parse_date(a.get(DATE_COLUMN));
        let date_b = parse_date(b.get(DATE_COLUMN));
        let by_date = match (date_a, date_b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => x.cmp(&y),
        };
        by_date
            .then_with(|| compare_collated(a.get(ROLE_COLUMN), b.get(ROLE_COLUMN)))
            .then_with(|| compare_collated(a.get(NAME_COLUMN), b.get(NAME_COLUMN)))
    });
}
