//! CLI error types

use demo_inputs::LoadError;
use demo_outputs::SinkError;
use pricer_core::types::PricingError;
use pricer_risk::RiskError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Risk(#[from] RiskError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Returns `true` when the command itself is invalid (configuration,
    /// arguments, or a measure or parameter the family does not support)
    /// rather than one record's inputs.
    pub fn is_configuration(&self) -> bool {
        match self {
            CliError::Config(_) | CliError::InvalidArgument(_) => true,
            CliError::Pricing(err) | CliError::Risk(RiskError::Pricing(err)) => {
                err.is_configuration()
            }
            CliError::Risk(_) | CliError::Load(_) | CliError::Sink(_) => false,
        }
    }
}

/// Result type for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
