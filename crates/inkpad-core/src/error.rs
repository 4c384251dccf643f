//! Error types for inkpad.

use thiserror::Error;

/// Result type alias using inkpad's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for inkpad operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Pasted text is not an absolute http(s) URL
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    /// Probe response did not name an allow-listed image type
    #[error("Unclassified content type: {0}")]
    UnclassifiedContentType(String),

    /// HTTP/network request failed or timed out
    #[error("Network error: {0}")]
    Network(String),

    /// Serialized snapshot is larger than the storage budget
    #[error("Capacity exceeded: {size_bytes} bytes over budget of {budget_bytes} bytes")]
    CapacityExceeded { size_bytes: usize, budget_bytes: usize },

    /// Persisted record could not be turned back into a snapshot
    #[error("Corrupt persisted record: {0}")]
    CorruptRecord(String),

    /// Uploaded file is not an allow-listed image
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    /// Storage backend failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Network(e.to_string())
    }
}
