//! Shared view state applied across every loaded snapshot

use crate::filter::StatusFilter;
use crate::sort::SortState;

/// One filter, one search term, one sort: applied uniformly to every
/// snapshot in the view, never per snapshot.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub filter: StatusFilter,
    pub search: String,
    pub sort: SortState,
}

impl ViewState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
