//! Updater-or-value callbacks.

use std::fmt;

/// A state change expressed either as the new value or as a function of the
/// current value.
///
/// # Example
///
/// ```
/// use backoffice_table::state::{Pagination, Updater};
///
/// let current = Pagination::new(0, 10);
///
/// let next = Updater::Value(Pagination::new(4, 20)).resolve(&current);
/// assert_eq!(next.page_index, 4);
///
/// let next = Updater::function(|p: &Pagination| Pagination::new(p.page_index + 1, p.page_size))
///     .resolve(&current);
/// assert_eq!(next.page_index, 1);
/// ```
pub enum Updater<T> {
    /// Replace the current value.
    Value(T),
    /// Derive the new value from the current one.
    Function(Box<dyn FnOnce(&T) -> T + Send>),
}

impl<T> Updater<T> {
    /// Wraps a function updater.
    pub fn function<F>(f: F) -> Self
    where
        F: FnOnce(&T) -> T + Send + 'static,
    {
        Self::Function(Box::new(f))
    }

    /// Resolves the updater against the current value.
    pub fn resolve(self, current: &T) -> T {
        match self {
            Self::Value(value) => value,
            Self::Function(f) => f(current),
        }
    }
}

impl<T> From<T> for Updater<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Updater<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}
