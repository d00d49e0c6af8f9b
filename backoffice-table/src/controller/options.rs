//! Controller configuration.

use std::time::Duration;

use crate::navigation::HistoryMode;
use crate::state::ColumnFilter;
use crate::state::ColumnVisibility;
use crate::state::DEFAULT_PER_PAGE;
use crate::state::RowSelection;
use crate::state::SortEntry;

/// Default quiet interval before a filter change resets the page.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default throttle interval for high-frequency updates.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(50);

/// Seed values used where the URL has nothing to say.
///
/// Filters, visibility and selection never come from the URL, so they are
/// always taken from here.
#[derive(Debug, Clone, Default)]
pub struct InitialState {
    /// 0-based page index.
    pub page_index: Option<u32>,
    /// Rows per page. Also becomes the default omitted from the URL.
    pub page_size: Option<u32>,
    /// Initial sorting.
    pub sorting: Option<Vec<SortEntry>>,
    /// Initial column filters.
    pub column_filters: Vec<ColumnFilter>,
    /// Initial column visibility.
    pub column_visibility: ColumnVisibility,
    /// Initial row selection.
    pub row_selection: RowSelection,
}

impl InitialState {
    /// Creates an empty seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the 0-based page index.
    pub fn with_page_index(mut self, page_index: u32) -> Self {
        self.page_index = Some(page_index);
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sets the initial sorting.
    pub fn with_sorting(mut self, sorting: Vec<SortEntry>) -> Self {
        self.sorting = Some(sorting);
        self
    }

    /// Sets the initial column filters.
    pub fn with_column_filters(mut self, filters: Vec<ColumnFilter>) -> Self {
        self.column_filters = filters;
        self
    }

    /// Hides a column initially.
    pub fn with_hidden_column(mut self, column_id: impl Into<String>) -> Self {
        self.column_visibility.insert(column_id.into(), false);
        self
    }

    /// Sets the initial row selection.
    pub fn with_row_selection(mut self, selection: RowSelection) -> Self {
        self.row_selection = selection;
        self
    }
}

/// Configuration for a [`TableController`](super::TableController).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use backoffice_table::controller::{InitialState, TableOptions};
/// use backoffice_table::navigation::HistoryMode;
///
/// let options = TableOptions::default()
///     .with_history_mode(HistoryMode::Push)
///     .with_debounce(Duration::from_millis(500))
///     .with_initial_state(InitialState::new().with_page_size(25));
///
/// assert_eq!(options.effective_default_per_page(), 25);
/// ```
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Seed state.
    pub initial_state: InitialState,

    /// Push or replace history entries on URL writes.
    ///
    /// Default: replace
    pub history_mode: HistoryMode,

    /// Quiet interval before a filter change resets the page.
    ///
    /// Default: 300 ms
    pub debounce: Duration,

    /// Throttle interval for high-frequency updates. Stored for hosts that
    /// throttle their own event delivery; the controller does not use it.
    ///
    /// Default: 50 ms
    pub throttle: Duration,

    /// Rows per page omitted from the URL, unless the initial state sets a
    /// page size.
    ///
    /// Default: 10
    pub default_per_page: u32,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            initial_state: InitialState::default(),
            history_mode: HistoryMode::Replace,
            debounce: DEFAULT_DEBOUNCE,
            throttle: DEFAULT_THROTTLE,
            default_per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl TableOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the seed state.
    pub fn with_initial_state(mut self, initial_state: InitialState) -> Self {
        self.initial_state = initial_state;
        self
    }

    /// Sets the history mode.
    pub fn with_history_mode(mut self, history_mode: HistoryMode) -> Self {
        self.history_mode = history_mode;
        self
    }

    /// Sets the filter debounce interval.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Sets the throttle interval.
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Sets the default rows per page.
    pub fn with_default_per_page(mut self, per_page: u32) -> Self {
        self.default_per_page = per_page;
        self
    }

    /// Returns the page size that is left out of the URL: the initial page
    /// size if one was given, else [`default_per_page`](Self::default_per_page).
    pub fn effective_default_per_page(&self) -> u32 {
        self.initial_state
            .page_size
            .unwrap_or(self.default_per_page)
            .max(1)
    }
}
