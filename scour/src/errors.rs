use std::io;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while configuring or running a search
#[derive(Error, Debug)]
pub enum SearchError {
    /// The search pattern failed to compile. Displays the regex crate's
    /// own message, which is what the CLI reports verbatim.
    #[error("{0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Io(#[from] io::Error),

    /// A scanned line exceeded the per-line buffer ceiling. Aborts the
    /// scan of that file only.
    #[error("line {line} exceeds {limit} bytes")]
    LineTooLong { line: usize, limit: usize },
}

impl SearchError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
