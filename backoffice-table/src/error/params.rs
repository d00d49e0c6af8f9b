//! Query parameter decoding errors

/// Errors that can occur while decoding table state from query parameters.
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    /// The value is not an integer.
    #[error("Invalid integer for `{key}`: {value:?}")]
    InvalidInteger {
        /// Query parameter name.
        key: &'static str,
        /// Raw value found in the URL.
        value: String,
    },

    /// The value is an integer but outside the accepted range.
    #[error("Value out of range for `{key}`: {value}")]
    OutOfRange {
        /// Query parameter name.
        key: &'static str,
        /// Parsed value.
        value: i64,
    },

    /// The `sort` parameter is not a valid serialized sort list.
    #[error("Invalid sort parameter: {0}")]
    InvalidSort(#[from] serde_json::Error),
}

impl ParamError {
    /// Returns the name of the offending query parameter.
    pub fn key(&self) -> &'static str {
        match self {
            Self::InvalidInteger { key, .. } | Self::OutOfRange { key, .. } => key,
            Self::InvalidSort(_) => crate::params::SORT_KEY,
        }
    }
}
