//! Error types for charaslot-io

use thiserror::Error;

/// Persistence error type
#[derive(Debug, Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Text could not be decoded
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Persisted document does not have the expected shape
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// Layout configuration could not be loaded
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type for persistence operations
pub type Result<T> = std::result::Result<T, Error>;
