//! Sink error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while writing results.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Filesystem failure on the target path.
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        /// Target path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// CSV encoding failure.
    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failure.
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}
