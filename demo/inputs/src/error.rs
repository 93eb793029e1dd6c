//! Loader error types.

use std::path::PathBuf;

use pricer_core::types::PricingError;
use thiserror::Error;

/// Errors raised while loading option records.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("Failed to open {}: {source}", .path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Malformed CSV or a cell that does not parse as the expected type.
    #[error("Malformed record file: {0}")]
    Csv(#[from] csv::Error),

    /// A row parsed but does not describe a valid record.
    #[error("Invalid record on line {line}: {source}")]
    Record {
        /// 1-based line number in the file
        line: u64,
        /// Underlying error
        source: PricingError,
    },
}
