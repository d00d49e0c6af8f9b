//! Table state types.
//!
//! [`TableState`] is the single aggregate a controller owns: pagination,
//! sorting, column filters, column visibility and row selection. Only the
//! first three are ever reflected in the URL.

mod filter;
mod sort;
mod updater;

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

pub use filter::ColumnFilter;
pub use filter::FilterValue;
pub use sort::Direction;
pub use sort::SortEntry;
pub use updater::Updater;

/// Rows per page when neither the URL nor the caller provides a value.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Column id to visibility. Columns without an entry are visible.
pub type ColumnVisibility = HashMap<String, bool>;

/// Row key to selection flag.
pub type RowSelection = HashMap<String, bool>;

/// Pagination in the shape table renderers use: a 0-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 0-based page index.
    pub page_index: u32,
    /// Rows per page.
    pub page_size: u32,
}

impl Pagination {
    /// Creates pagination from a 0-based index and a page size.
    pub fn new(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// Creates pagination from a 1-based page number.
    pub fn from_page(page: u32, page_size: u32) -> Self {
        Self::new(page.max(1) - 1, page_size)
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> u32 {
        self.page_index.saturating_add(1)
    }
}

/// Per-instance table state.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    /// 1-based current page, always at least 1.
    pub page: u32,
    /// Rows per page.
    pub per_page: u32,
    /// Sort keys in precedence order. Empty means server default order.
    pub sorting: Vec<SortEntry>,
    /// Active column filters.
    pub column_filters: Vec<ColumnFilter>,
    /// Hidden columns are excluded from rendering, not from data.
    pub column_visibility: ColumnVisibility,
    /// Selected rows.
    pub row_selection: RowSelection,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            sorting: Vec::new(),
            column_filters: Vec::new(),
            column_visibility: ColumnVisibility::new(),
            row_selection: RowSelection::new(),
        }
    }
}

impl TableState {
    /// Returns the derived renderer pagination.
    pub fn pagination(&self) -> Pagination {
        Pagination::from_page(self.page, self.per_page)
    }

    /// Returns `true` unless the column was explicitly hidden.
    pub fn is_column_visible(&self, column_id: &str) -> bool {
        self.column_visibility
            .get(column_id)
            .copied()
            .unwrap_or(true)
    }

    /// Returns the keys of selected rows, sorted.
    pub fn selected_row_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .row_selection
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }
}
