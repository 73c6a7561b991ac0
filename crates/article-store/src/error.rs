//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing the store.
///
/// Reads never fail: a missing or corrupt file loads as empty.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem error.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
