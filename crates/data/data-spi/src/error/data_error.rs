//! Data error types.

use thiserror::Error;

/// Data source errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// Reading from the underlying file or stream failed
    #[error("I/O error: {0}")]
    Io(String),

    /// Failed to decode the input
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value that should be numeric is not
    #[error("Non-numeric value at {position}: {found}")]
    NonNumeric { position: String, found: String },

    /// Nothing usable was left after cleaning
    #[error("No data returned")]
    NoData,

    /// The store has no collection with this name
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// The collection name cannot be used
    #[error("Invalid collection name: {0}")]
    InvalidCollection(String),

    /// A one-shot source was read twice
    #[error("Source already consumed: {0}")]
    Exhausted(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;
