//! CLI error types

/// Errors that end a CLI run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Log file or output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
