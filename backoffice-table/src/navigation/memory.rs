//! In-memory history stack.

use std::sync::Arc;
use std::sync::RwLock;

use super::NavigateOptions;
use super::Navigator;
use crate::error::NavigationError;
use crate::params::SearchParams;

#[derive(Debug)]
struct HistoryInner {
    /// History entries, oldest first. Never empty.
    entries: Vec<SearchParams>,
    /// Index of the current entry.
    index: usize,
    /// Accepted navigations since creation.
    navigations: usize,
    /// Fail every navigation while set.
    rejecting: bool,
}

/// A browser-like history of query strings kept in memory.
///
/// Cheap to clone; clones share the same history.
///
/// # Example
///
/// ```
/// use backoffice_table::navigation::{MemoryHistory, NavigateOptions, Navigator};
/// use backoffice_table::params::SearchParams;
///
/// let history = MemoryHistory::new("foo=bar");
/// history
///     .navigate(NavigateOptions {
///         search: SearchParams::parse("foo=bar&page=2"),
///         replace: false,
///     })
///     .unwrap();
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.location(), "foo=bar&page=2");
/// assert!(history.back());
/// assert_eq!(history.location(), "foo=bar");
/// ```
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    inner: Arc<RwLock<HistoryInner>>,
}

impl MemoryHistory {
    /// Creates a history with a single entry for `query`.
    pub fn new(query: &str) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HistoryInner {
                entries: vec![SearchParams::parse(query)],
                index: 0,
                navigations: 0,
                rejecting: false,
            })),
        }
    }

    /// Returns the current query string without the leading `?`.
    pub fn location(&self) -> String {
        self.search_params().to_query_string()
    }

    /// Returns the number of history entries.
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.entries.len()).unwrap_or(0)
    }

    /// Always `false`; a history has at least its initial entry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of accepted navigations.
    pub fn navigation_count(&self) -> usize {
        self.inner.read().map(|g| g.navigations).unwrap_or(0)
    }

    /// Moves one entry back. Returns `false` at the oldest entry.
    pub fn back(&self) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && guard.index > 0
        {
            guard.index -= 1;
            return true;
        }
        false
    }

    /// Moves one entry forward. Returns `false` at the newest entry.
    pub fn forward(&self) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && guard.index + 1 < guard.entries.len()
        {
            guard.index += 1;
            return true;
        }
        false
    }

    /// Makes every following navigation fail (or succeed again).
    pub fn reject_navigations(&self, reject: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rejecting = reject;
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl Navigator for MemoryHistory {
    fn search_params(&self) -> SearchParams {
        self.inner
            .read()
            .map(|g| g.entries[g.index].clone())
            .unwrap_or_default()
    }

    fn navigate(&self, options: NavigateOptions) -> Result<(), NavigationError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| NavigationError::rejected("history lock poisoned"))?;

        if guard.rejecting {
            return Err(NavigationError::rejected("navigation blocked"));
        }

        if options.replace {
            let index = guard.index;
            guard.entries[index] = options.search;
        } else {
            let keep = guard.index + 1;
            guard.entries.truncate(keep);
            guard.entries.push(options.search);
            guard.index = keep;
        }
        guard.navigations += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go(history: &MemoryHistory, query: &str, replace: bool) {
        history
            .navigate(NavigateOptions {
                search: SearchParams::parse(query),
                replace,
            })
            .unwrap();
    }

    #[test]
    fn test_replace_keeps_length() {
        let history = MemoryHistory::new("");
        go(&history, "page=2", true);
        go(&history, "page=3", true);
        assert_eq!(history.len(), 1);
        assert_eq!(history.location(), "page=3");
        assert_eq!(history.navigation_count(), 2);
    }

    #[test]
    fn test_push_after_back_drops_forward_entries() {
        let history = MemoryHistory::new("");
        go(&history, "page=2", false);
        go(&history, "page=3", false);
        assert!(history.back());
        go(&history, "page=9", false);
        assert_eq!(history.len(), 3);
        assert!(!history.forward());
        assert_eq!(history.location(), "page=9");
    }

    #[test]
    fn test_rejecting() {
        let history = MemoryHistory::new("a=1");
        history.reject_navigations(true);
        let result = history.navigate(NavigateOptions {
            search: SearchParams::parse("a=2"),
            replace: true,
        });
        assert!(matches!(result, Err(NavigationError::Rejected(_))));
        assert_eq!(history.location(), "a=1");
        assert_eq!(history.navigation_count(), 0);
    }
}
