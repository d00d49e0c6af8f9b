//! Navigable URL store.
//!
//! The controller only ever talks to the URL through [`Navigator`]. Hosts
//! plug in their router; [`MemoryHistory`] is the in-process implementation
//! used by the CLI and the tests.

mod memory;

pub use memory::MemoryHistory;

use crate::error::NavigationError;
use crate::params::SearchParams;

/// Whether state-changing navigations add a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    /// Every change becomes a new back-button entry.
    Push,
    /// Changes overwrite the current entry.
    #[default]
    Replace,
}

impl HistoryMode {
    /// Returns `true` for [`HistoryMode::Replace`].
    pub fn is_replace(self) -> bool {
        self == Self::Replace
    }
}

/// A navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigateOptions {
    /// The complete query string to navigate to.
    pub search: SearchParams,
    /// Replace the current history entry instead of pushing one.
    pub replace: bool,
}

/// Access to the application's current URL query string.
///
/// The query string is shared by the whole application. Implementations
/// apply `search` as given; the caller is responsible for merging its keys
/// into what [`search_params`](Navigator::search_params) returned.
pub trait Navigator: Send + Sync {
    /// Returns the current query parameters.
    fn search_params(&self) -> SearchParams;

    /// Navigates to a new query string.
    fn navigate(&self, options: NavigateOptions) -> Result<(), NavigationError>;
}
