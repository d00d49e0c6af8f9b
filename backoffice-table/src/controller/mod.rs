//! URL-synchronized table state controller.
//!
//! A [`TableController`] owns the [`TableState`] of one table view. Page,
//! page size and sorting are mirrored into the URL query string through a
//! [`Navigator`]; filters, visibility and selection stay local.
//!
//! Local state is updated synchronously and is always authoritative for
//! rendering. URL writes are fire-and-forget: a rejected navigation is
//! logged and otherwise ignored.
//!
//! # Example
//!
//! ```
//! use backoffice_table::controller::{TableController, TableOptions};
//! use backoffice_table::navigation::MemoryHistory;
//! use backoffice_table::state::SortEntry;
//!
//! let history = MemoryHistory::new("branch=7");
//! let table = TableController::new(history.clone(), TableOptions::default());
//!
//! table.set_page(3);
//! table.set_sorting(vec![SortEntry::desc("price")]);
//!
//! assert_eq!(table.state().page, 3);
//! assert!(history.location().starts_with("branch=7&page=3&sort="));
//! ```

mod model;
mod options;

use std::fmt;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::Weak;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub use model::PageCount;
pub use model::PaginationControls;
pub use model::TableEvents;
pub use model::TableModel;
pub use options::DEFAULT_DEBOUNCE;
pub use options::DEFAULT_THROTTLE;
pub use options::InitialState;
pub use options::TableOptions;

use crate::debounce::Debouncer;
use crate::error::ParamError;
use crate::navigation::HistoryMode;
use crate::navigation::NavigateOptions;
use crate::navigation::Navigator;
use crate::params::SearchParams;
use crate::params::UrlTableState;
use crate::params::write_page;
use crate::params::write_per_page;
use crate::params::write_sort;
use crate::state::ColumnFilter;
use crate::state::ColumnVisibility;
use crate::state::FilterValue;
use crate::state::Pagination;
use crate::state::RowSelection;
use crate::state::SortEntry;
use crate::state::TableState;
use crate::state::Updater;

struct ControllerInner {
    state: RwLock<TableState>,
    navigator: Arc<dyn Navigator>,
    history_mode: HistoryMode,
    default_per_page: u32,
    throttle: Duration,
    /// Pending filter-driven page reset.
    page_reset: Debouncer,
    /// Cleared by `unmount`; no URL writes afterwards.
    mounted: AtomicBool,
}

/// Pagination, sorting and filter state for one table view.
///
/// Cheap to clone; clones share state. The debounced page reset only holds a
/// weak reference, so dropping the last handle cancels it.
#[derive(Clone)]
pub struct TableController {
    inner: Arc<ControllerInner>,
}

impl fmt::Debug for TableController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableController")
            .field("state", &self.state())
            .field("history_mode", &self.inner.history_mode)
            .field("default_per_page", &self.inner.default_per_page)
            .field("mounted", &self.is_mounted())
            .finish_non_exhaustive()
    }
}

impl TableController {
    /// Creates a controller seeded from the navigator's current URL, falling
    /// back to `options.initial_state` for values the URL lacks.
    pub fn new<N>(navigator: N, options: TableOptions) -> Self
    where
        N: Navigator + 'static,
    {
        Self::with_navigator(Arc::new(navigator), options)
    }

    /// Creates a controller over a shared navigator.
    pub fn with_navigator(navigator: Arc<dyn Navigator>, options: TableOptions) -> Self {
        let default_per_page = options.effective_default_per_page();
        let url = UrlTableState::from_params(&navigator.search_params());
        let initial = options.initial_state;

        let state = TableState {
            page: url
                .page
                .or(initial.page_index.map(|index| index.saturating_add(1)))
                .unwrap_or(1),
            per_page: url.per_page.unwrap_or(default_per_page),
            sorting: url.sorting.or(initial.sorting).unwrap_or_default(),
            column_filters: initial.column_filters,
            column_visibility: initial.column_visibility,
            row_selection: initial.row_selection,
        };
        log::debug!(
            "Table mounted at page {} ({} per page, {} sort keys)",
            state.page,
            state.per_page,
            state.sorting.len()
        );

        Self {
            inner: Arc::new(ControllerInner {
                state: RwLock::new(state),
                navigator,
                history_mode: options.history_mode,
                default_per_page,
                throttle: options.throttle,
                page_reset: Debouncer::new(options.debounce),
                mounted: AtomicBool::new(true),
            }),
        }
    }

    // -------------------------------------------------------------------------
    // State access
    // -------------------------------------------------------------------------

    fn read<T>(&self, f: impl FnOnce(&TableState) -> T) -> T {
        let guard = self.inner.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write<T>(&self, f: impl FnOnce(&mut TableState) -> T) -> T {
        let mut guard = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Returns a snapshot of the state.
    pub fn state(&self) -> TableState {
        self.read(TableState::clone)
    }

    /// Returns the derived 0-based pagination.
    pub fn pagination(&self) -> Pagination {
        self.read(TableState::pagination)
    }

    /// Returns the 1-based current page.
    pub fn page(&self) -> u32 {
        self.read(|s| s.page)
    }

    /// Returns the rows per page.
    pub fn per_page(&self) -> u32 {
        self.read(|s| s.per_page)
    }

    /// Returns the sorting.
    pub fn sorting(&self) -> Vec<SortEntry> {
        self.read(|s| s.sorting.clone())
    }

    /// Returns the column filters.
    pub fn column_filters(&self) -> Vec<ColumnFilter> {
        self.read(|s| s.column_filters.clone())
    }

    /// Returns the history mode used for URL writes.
    pub fn history_mode(&self) -> HistoryMode {
        self.inner.history_mode
    }

    /// Returns the page size omitted from the URL.
    pub fn default_per_page(&self) -> u32 {
        self.inner.default_per_page
    }

    /// Returns the filter debounce interval.
    pub fn debounce(&self) -> Duration {
        self.inner.page_reset.delay()
    }

    /// Returns the configured throttle interval.
    pub fn throttle(&self) -> Duration {
        self.inner.throttle
    }

    /// Builds the renderer model for the current page of rows.
    ///
    /// Columns are passed per render rather than stored, since column
    /// definitions usually close over per-render data such as translations
    /// or row actions.
    pub fn model<C, R>(&self, columns: Vec<C>, data: Vec<R>, page_count: PageCount) -> TableModel<C, R> {
        TableModel::new(self.clone(), columns, data, page_count)
    }

    // -------------------------------------------------------------------------
    // URL-backed setters
    // -------------------------------------------------------------------------
    //
    // `on_*_change` handlers resolve their updater while holding the state
    // lock, so concurrent updates compose. Updater functions must not call
    // back into the controller.

    /// Moves to a 1-based page. Pages below 1 are clamped to 1.
    pub fn set_page(&self, page: u32) {
        let page = page.max(1);
        self.write(|s| s.page = page);
        self.sync_url(|params| {
            write_page(params, page);
            Ok(())
        });
    }

    /// Changes the page size without touching the page.
    pub fn set_per_page(&self, per_page: u32) {
        let per_page = per_page.max(1);
        let default = self.inner.default_per_page;
        self.write(|s| s.per_page = per_page);
        self.sync_url(|params| {
            write_per_page(params, per_page, default);
            Ok(())
        });
    }

    /// Replaces the sorting.
    pub fn set_sorting(&self, sorting: Vec<SortEntry>) {
        self.write(|s| s.sorting = sorting.clone());
        self.sync_url(|params| write_sort(params, &sorting));
    }

    /// Applies a renderer pagination change. Page and page size are written
    /// to the URL in a single navigation.
    pub fn on_pagination_change(&self, updater: impl Into<Updater<Pagination>>) {
        let updater = updater.into();
        let default = self.inner.default_per_page;

        let (page, per_page) = self.write(|s| {
            let next = updater.resolve(&s.pagination());
            s.page = next.page();
            s.per_page = next.page_size.max(1);
            (s.page, s.per_page)
        });
        self.sync_url(|params| {
            write_page(params, page);
            write_per_page(params, per_page, default);
            Ok(())
        });
    }

    /// Applies a renderer sorting change.
    pub fn on_sorting_change(&self, updater: impl Into<Updater<Vec<SortEntry>>>) {
        let updater = updater.into();
        let sorting = self.write(|s| {
            s.sorting = updater.resolve(&s.sorting);
            s.sorting.clone()
        });
        self.sync_url(|params| write_sort(params, &sorting));
    }

    // -------------------------------------------------------------------------
    // Local state
    // -------------------------------------------------------------------------

    /// Applies a filter change locally and schedules the debounced reset to
    /// page 1. Each change restarts the debounce window.
    pub fn on_column_filters_change(&self, updater: impl Into<Updater<Vec<ColumnFilter>>>) {
        let updater = updater.into();
        self.write(|s| s.column_filters = updater.resolve(&s.column_filters));
        self.schedule_page_reset();
    }

    /// Sets or clears (`None`) the filter of one column.
    pub fn set_column_filter(&self, column_id: &str, value: Option<FilterValue>) {
        let column_id = column_id.to_string();
        self.on_column_filters_change(Updater::function(move |filters: &Vec<ColumnFilter>| {
            let mut filters = filters.clone();
            match filters.iter().position(|f| f.column_id == column_id) {
                Some(index) => match value {
                    Some(value) => filters[index].value = value,
                    None => {
                        filters.remove(index);
                    }
                },
                None => {
                    if let Some(value) = value {
                        filters.push(ColumnFilter::new(column_id, value));
                    }
                }
            }
            filters
        }));
    }

    /// Applies a column visibility change.
    pub fn on_column_visibility_change(&self, updater: impl Into<Updater<ColumnVisibility>>) {
        let updater = updater.into();
        self.write(|s| s.column_visibility = updater.resolve(&s.column_visibility));
    }

    /// Flips a column between visible and hidden. Returns the new visibility.
    pub fn toggle_column_visibility(&self, column_id: &str) -> bool {
        self.write(|s| {
            let visible = !s.is_column_visible(column_id);
            s.column_visibility.insert(column_id.to_string(), visible);
            visible
        })
    }

    /// Returns `true` unless the column was hidden.
    pub fn is_column_visible(&self, column_id: &str) -> bool {
        self.read(|s| s.is_column_visible(column_id))
    }

    /// Applies a row selection change.
    pub fn on_row_selection_change(&self, updater: impl Into<Updater<RowSelection>>) {
        let updater = updater.into();
        self.write(|s| s.row_selection = updater.resolve(&s.row_selection));
    }

    /// Toggles selection of a row. Returns the new selection flag.
    pub fn toggle_row_selected(&self, key: &str) -> bool {
        self.write(|s| {
            let selected = !s.row_selection.get(key).copied().unwrap_or(false);
            if selected {
                s.row_selection.insert(key.to_string(), true);
            } else {
                s.row_selection.remove(key);
            }
            selected
        })
    }

    /// Clears the row selection.
    pub fn clear_row_selection(&self) {
        self.write(|s| s.row_selection.clear());
    }

    /// Returns the selected row keys, sorted.
    pub fn selected_row_keys(&self) -> Vec<String> {
        self.read(TableState::selected_row_keys)
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Returns `true` while a filter-driven page reset is scheduled.
    pub fn has_pending_reset(&self) -> bool {
        self.inner.page_reset.is_pending()
    }

    /// Returns `false` after [`unmount`](Self::unmount).
    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.load(Ordering::SeqCst)
    }

    /// Detaches the controller from its view: cancels the pending page reset
    /// and stops URL writes. Local state remains usable.
    pub fn unmount(&self) {
        self.inner.mounted.store(false, Ordering::SeqCst);
        if self.inner.page_reset.cancel() {
            log::debug!("Cancelled pending page reset on unmount");
        }
    }

    fn schedule_page_reset(&self) {
        if !self.is_mounted() {
            return;
        }
        let weak: Weak<ControllerInner> = Arc::downgrade(&self.inner);
        log::debug!(
            "Filters changed; page reset in {:?}",
            self.inner.page_reset.delay()
        );
        self.inner.page_reset.call(move || {
            if let Some(inner) = weak.upgrade() {
                TableController { inner }.set_page(1);
            }
        });
    }

    /// Merges this controller's keys into the current query string and
    /// navigates if anything changed.
    fn sync_url<F>(&self, apply: F)
    where
        F: FnOnce(&mut SearchParams) -> Result<(), ParamError>,
    {
        if !self.is_mounted() {
            log::debug!("Table unmounted; skipping URL update");
            return;
        }

        let current = self.inner.navigator.search_params();
        let mut search = current.clone();
        if let Err(e) = apply(&mut search) {
            log::warn!("Could not encode table state into the URL: {}", e);
            return;
        }
        if search == current {
            return;
        }

        log::debug!("Navigating to ?{}", search);
        let options = NavigateOptions {
            search,
            replace: self.inner.history_mode.is_replace(),
        };
        if let Err(e) = self.inner.navigator.navigate(options) {
            log::warn!("URL update failed, keeping local table state: {}", e);
        }
    }
}

impl TableEvents for TableController {
    fn on_pagination_change(&self, updater: Updater<Pagination>) {
        TableController::on_pagination_change(self, updater);
    }

    fn on_sorting_change(&self, updater: Updater<Vec<SortEntry>>) {
        TableController::on_sorting_change(self, updater);
    }

    fn on_column_filters_change(&self, updater: Updater<Vec<ColumnFilter>>) {
        TableController::on_column_filters_change(self, updater);
    }

    fn on_column_visibility_change(&self, updater: Updater<ColumnVisibility>) {
        TableController::on_column_visibility_change(self, updater);
    }

    fn on_row_selection_change(&self, updater: Updater<RowSelection>) {
        TableController::on_row_selection_change(self, updater);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::navigation::MemoryHistory;

    fn controller(query: &str) -> (MemoryHistory, TableController) {
        let history = MemoryHistory::new(query);
        let table = TableController::new(history.clone(), TableOptions::default());
        (history, table)
    }

    #[test]
    fn test_seed_from_url_beats_initial_state() {
        let history = MemoryHistory::new("page=4&perPage=20");
        let options = TableOptions::default().with_initial_state(
            InitialState::new()
                .with_page_index(1)
                .with_page_size(50)
                .with_sorting(vec![SortEntry::asc("name")]),
        );
        let table = TableController::new(history, options);
        let state = table.state();
        assert_eq!(state.page, 4);
        assert_eq!(state.per_page, 20);
        assert_eq!(state.sorting, vec![SortEntry::asc("name")]);
    }

    #[test]
    fn test_seed_from_initial_state() {
        let options = TableOptions::default().with_initial_state(
            InitialState::new()
                .with_page_index(2)
                .with_page_size(25)
                .with_hidden_column("cost")
                .with_column_filters(vec![ColumnFilter::new("name", "soup")]),
        );
        let table = TableController::new(MemoryHistory::default(), options);
        let state = table.state();
        assert_eq!(state.page, 3);
        assert_eq!(state.per_page, 25);
        assert!(!state.is_column_visible("cost"));
        assert_eq!(state.column_filters.len(), 1);
        assert_eq!(table.default_per_page(), 25);
    }

    #[test]
    fn test_defaults() {
        let (_, table) = controller("");
        assert_eq!(table.page(), 1);
        assert_eq!(table.per_page(), 10);
        assert!(table.sorting().is_empty());
        assert_eq!(table.history_mode(), HistoryMode::Replace);
        assert_eq!(table.debounce(), Duration::from_millis(300));
        assert_eq!(table.throttle(), Duration::from_millis(50));
    }

    #[test]
    fn test_set_page_zero_is_clamped() {
        let (history, table) = controller("page=5");
        table.set_page(0);
        assert_eq!(table.page(), 1);
        assert_eq!(history.location(), "");
    }

    #[test]
    fn test_set_per_page_keeps_page() {
        let (history, table) = controller("page=3");
        table.set_per_page(50);
        assert_eq!(table.page(), 3);
        assert_eq!(history.location(), "page=3&perPage=50");
    }

    #[test]
    fn test_unchanged_url_is_not_navigated() {
        let (history, table) = controller("page=2");
        table.set_page(2);
        assert_eq!(history.navigation_count(), 0);
    }

    #[test]
    fn test_on_sorting_change_function_updater() {
        let (history, table) = controller("");
        table.set_sorting(vec![SortEntry::asc("name")]);
        table.on_sorting_change(Updater::function(|sorting: &Vec<SortEntry>| {
            let mut next = sorting.clone();
            next.push(SortEntry::desc("price"));
            next
        }));
        assert_eq!(
            table.sorting(),
            vec![SortEntry::asc("name"), SortEntry::desc("price")]
        );
        assert!(history.location().starts_with("sort="));
    }

    #[test]
    fn test_set_column_filter_add_update_remove() {
        let (_, table) = controller("");
        table.set_column_filter("name", Some(json!("bur")));
        table.set_column_filter("name", Some(json!("burger")));
        table.set_column_filter("active", Some(json!(true)));
        assert_eq!(
            table.column_filters(),
            vec![
                ColumnFilter::new("name", "burger"),
                ColumnFilter::new("active", true)
            ]
        );
        table.set_column_filter("name", None);
        assert_eq!(table.column_filters(), vec![ColumnFilter::new("active", true)]);
    }

    #[test]
    fn test_visibility_and_selection_stay_local() {
        let (history, table) = controller("foo=bar");
        assert!(!table.toggle_column_visibility("sku"));
        assert!(table.toggle_row_selected("row-1"));
        assert!(table.toggle_row_selected("row-2"));
        assert!(!table.toggle_row_selected("row-1"));
        assert_eq!(table.selected_row_keys(), vec!["row-2"]);
        table.clear_row_selection();
        assert!(table.selected_row_keys().is_empty());
        assert!(!table.is_column_visible("sku"));
        assert_eq!(history.navigation_count(), 0);
    }

    #[test]
    fn test_model_is_manual() {
        let (_, table) = controller("page=2");
        let model = table.model(vec!["name"], vec![1, 2, 3], PageCount::Known(5));
        assert!(model.manual_pagination);
        assert!(model.manual_sorting);
        assert!(model.manual_filtering);
        assert_eq!(model.pagination(), Pagination::new(1, 10));
        assert_eq!(model.controls().last_page, Some(5));
        assert_eq!(model.data, vec![1, 2, 3]);
    }

    #[test]
    fn test_renderer_events_reach_controller() {
        let (_, table) = controller("");
        let model: TableModel<&str, u32> = table.model(vec![], vec![], PageCount::Unknown);
        TableEvents::on_pagination_change(model.events(), Updater::Value(Pagination::new(1, 10)));
        assert_eq!(table.page(), 2);
    }

    #[test]
    fn test_concurrent_updaters_compose() {
        let (_, table) = controller("");
        std::thread::scope(|scope| {
            for t in 0..8 {
                let table = &table;
                scope.spawn(move || {
                    for i in 0..500 {
                        let key = format!("{t}-{i}");
                        table.on_row_selection_change(Updater::function(
                            move |selection: &RowSelection| {
                                let mut selection = selection.clone();
                                selection.insert(key, true);
                                selection
                            },
                        ));
                    }
                });
            }
        });
        assert_eq!(table.selected_row_keys().len(), 4000);
    }

    #[test]
    fn test_concurrent_pagination_updaters_compose() {
        let (_, table) = controller("");
        std::thread::scope(|scope| {
            for _ in 0..4 {
                let table = &table;
                scope.spawn(move || {
                    for _ in 0..50 {
                        table.on_pagination_change(Updater::function(|p: &Pagination| {
                            Pagination::new(p.page_index + 1, p.page_size)
                        }));
                    }
                });
            }
        });
        assert_eq!(table.page(), 201);
    }
}
