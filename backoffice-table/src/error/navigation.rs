//! Navigation error types

/// Errors reported by a [`Navigator`](crate::navigation::Navigator) when a
/// URL update cannot be applied.
///
/// The controller never surfaces these to the view: a failed URL write is
/// logged and the local table state stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// The router refused the navigation.
    #[error("Navigation rejected: {0}")]
    Rejected(String),
}

impl NavigationError {
    /// Creates a new rejection error.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }
}
