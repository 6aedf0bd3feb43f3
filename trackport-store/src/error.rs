//! Error types for the store layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when loading or persisting a backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing file did not contain a flat string-to-string object.
    #[error("invalid store data: {0}")]
    InvalidData(String),
}
