//! Table controller error types

/// Errors surfaced by the table state API.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Page count below the `-1` "unknown" sentinel.
    #[error("Invalid page count: {0} (expected -1 or a non-negative count)")]
    InvalidPageCount(i64),

    /// Malformed caller input, such as an unparsable sort entry.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl TableError {
    /// Creates a new invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
