//! Error types for sweep and batch evaluation.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::batch::BatchTable;

/// Errors raised by [`ParameterSweep`](crate::sweep::ParameterSweep) and
/// [`BatchPricer`](crate::batch::BatchPricer).
#[derive(Debug, Clone, Error)]
pub enum RiskError {
    /// Configuration-wide failure (unsupported parameter, bad grid, missing
    /// shock size). Nothing was evaluated.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// A sweep point failed. Sweeps do not return partial output.
    #[error("Sweep over {parameter} failed at {parameter} = {value}: {source}")]
    PointFailed {
        /// Swept parameter symbol
        parameter: String,
        /// Parameter value of the failing point
        value: f64,
        /// Underlying error
        source: PricingError,
    },

    /// A batch record failed. Rows computed before it are kept in `partial`.
    #[error("Record {id} failed: {source} ({} rows completed)", .partial.rows.len())]
    RecordFailed {
        /// Id of the failing record
        id: u64,
        /// Underlying error
        source: PricingError,
        /// Rows completed before the failure, in input order
        partial: Box<BatchTable>,
    },
}

impl RiskError {
    /// Rows completed before a record failure, if any.
    pub fn partial(&self) -> Option<&BatchTable> {
        match self {
            RiskError::RecordFailed { partial, .. } => Some(partial),
            _ => None,
        }
    }
}
