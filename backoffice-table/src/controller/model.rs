//! Renderer-facing table model.

use super::TableController;
use crate::error::TableError;
use crate::state::ColumnFilter;
use crate::state::ColumnVisibility;
use crate::state::Pagination;
use crate::state::RowSelection;
use crate::state::SortEntry;
use crate::state::TableState;
use crate::state::Updater;

/// Number of pages reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageCount {
    /// Still loading or not reported. Encoded as `-1`.
    #[default]
    Unknown,
    /// Known page count.
    Known(u32),
}

impl PageCount {
    /// Derives the page count from a total row count.
    pub fn from_total(total_rows: u64, per_page: u32) -> Self {
        let per_page = u64::from(per_page.max(1));
        let pages = total_rows.div_ceil(per_page);
        Self::Known(u32::try_from(pages).unwrap_or(u32::MAX))
    }

    /// Returns the `-1`-for-unknown encoding.
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Unknown => -1,
            Self::Known(count) => i64::from(count),
        }
    }
}

impl TryFrom<i64> for PageCount {
    type Error = TableError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Unknown),
            v if v < -1 => Err(TableError::InvalidPageCount(v)),
            v => Ok(Self::Known(u32::try_from(v).unwrap_or(u32::MAX))),
        }
    }
}

/// Which pagination affordances a renderer should enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControls {
    /// Current 1-based page.
    pub page: u32,
    /// "Previous" and "first" are usable.
    pub can_previous: bool,
    /// "Next" is usable. Always true while the page count is unknown.
    pub can_next: bool,
    /// "Last" is usable. Never true while the page count is unknown.
    pub can_last: bool,
    /// Last page number, when known and non-zero.
    pub last_page: Option<u32>,
}

impl PaginationControls {
    /// Computes the controls for a page and page count.
    pub fn new(page: u32, page_count: PageCount) -> Self {
        let page = page.max(1);
        match page_count {
            PageCount::Unknown => Self {
                page,
                can_previous: page > 1,
                can_next: true,
                can_last: false,
                last_page: None,
            },
            PageCount::Known(count) => Self {
                page,
                can_previous: page > 1,
                can_next: page < count,
                can_last: page < count,
                last_page: (count > 0).then_some(count),
            },
        }
    }
}

/// Callbacks a table renderer invokes on user interaction.
pub trait TableEvents {
    /// Pagination changed (0-based page index).
    fn on_pagination_change(&self, updater: Updater<Pagination>);

    /// Sorting changed.
    fn on_sorting_change(&self, updater: Updater<Vec<SortEntry>>);

    /// Column filters changed.
    fn on_column_filters_change(&self, updater: Updater<Vec<ColumnFilter>>);

    /// Column visibility changed.
    fn on_column_visibility_change(&self, updater: Updater<ColumnVisibility>);

    /// Row selection changed.
    fn on_row_selection_change(&self, updater: Updater<RowSelection>);
}

/// Everything a generic table renderer needs for one render.
///
/// The `manual_*` flags are always `true`: rows are already paginated,
/// sorted and filtered by the backend and must be rendered as given.
#[derive(Debug, Clone)]
pub struct TableModel<C, R> {
    /// Column descriptors, forwarded untouched.
    pub columns: Vec<C>,
    /// Rows of the current page.
    pub data: Vec<R>,
    /// Server-reported page count.
    pub page_count: PageCount,
    /// State snapshot taken when the model was built.
    pub state: TableState,
    /// Renderer must not slice rows into pages.
    pub manual_pagination: bool,
    /// Renderer must not reorder rows.
    pub manual_sorting: bool,
    /// Renderer must not drop rows.
    pub manual_filtering: bool,
    events: TableController,
}

impl<C, R> TableModel<C, R> {
    pub(super) fn new(
        events: TableController,
        columns: Vec<C>,
        data: Vec<R>,
        page_count: PageCount,
    ) -> Self {
        Self {
            columns,
            data,
            page_count,
            state: events.state(),
            manual_pagination: true,
            manual_sorting: true,
            manual_filtering: true,
            events,
        }
    }

    /// Returns the derived 0-based pagination.
    pub fn pagination(&self) -> Pagination {
        self.state.pagination()
    }

    /// Returns the pagination affordances.
    pub fn controls(&self) -> PaginationControls {
        PaginationControls::new(self.state.page, self.page_count)
    }

    /// Returns the event sink for renderer callbacks.
    pub fn events(&self) -> &TableController {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_from_i64() {
        assert_eq!(PageCount::try_from(-1i64).unwrap(), PageCount::Unknown);
        assert_eq!(PageCount::try_from(0i64).unwrap(), PageCount::Known(0));
        assert_eq!(PageCount::try_from(12i64).unwrap(), PageCount::Known(12));
        assert!(matches!(
            PageCount::try_from(-2i64),
            Err(TableError::InvalidPageCount(-2))
        ));
        assert_eq!(PageCount::Unknown.as_i64(), -1);
    }

    #[test]
    fn test_page_count_from_total() {
        assert_eq!(PageCount::from_total(0, 10), PageCount::Known(0));
        assert_eq!(PageCount::from_total(10, 10), PageCount::Known(1));
        assert_eq!(PageCount::from_total(11, 10), PageCount::Known(2));
        assert_eq!(PageCount::from_total(5, 0), PageCount::Known(5));
    }

    #[test]
    fn test_controls_unknown_page_count() {
        let controls = PaginationControls::new(3, PageCount::Unknown);
        assert!(controls.can_previous);
        assert!(controls.can_next);
        assert!(!controls.can_last);
        assert_eq!(controls.last_page, None);
    }

    #[test]
    fn test_controls_known_page_count() {
        let first = PaginationControls::new(1, PageCount::Known(4));
        assert!(!first.can_previous);
        assert!(first.can_next);
        assert_eq!(first.last_page, Some(4));

        let last = PaginationControls::new(4, PageCount::Known(4));
        assert!(!last.can_next);
        assert!(!last.can_last);

        let beyond = PaginationControls::new(9, PageCount::Known(4));
        assert_eq!(beyond.page, 9);
        assert!(!beyond.can_next);
    }

    #[test]
    fn test_controls_empty_result() {
        let controls = PaginationControls::new(1, PageCount::Known(0));
        assert!(!controls.can_next);
        assert_eq!(controls.last_page, None);
    }
}
