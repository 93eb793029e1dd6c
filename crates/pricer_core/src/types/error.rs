//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from valuation, parameter overrides and sweeps
//! - `PricingResult`: Convenience alias for `Result<T, PricingError>`

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every failure is raised at the point of detection and surfaced to the
/// caller. None of them is retried or downgraded to a default value.
///
/// # Variants
/// - `InvalidOptionKind`: Option kind outside {Call, Put}
/// - `ParameterNotApplicable`: Parameter not defined for the option family
/// - `InvalidInput`: Non-positive volatility, expiry or strike, bad step sizes
/// - `UnsupportedMeasure`: Measure not available for the option family
/// - `NumericalInstability`: Result is mathematically undefined at these inputs
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative volatility".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative volatility");
///
/// let err = PricingError::parameter_not_applicable("T", "AmericanPerpetual");
/// assert!(format!("{}", err).contains("not applicable"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Option kind is neither Call nor Put.
    #[error("Invalid option kind: {0}")]
    InvalidOptionKind(String),

    /// Parameter is not part of the option family's domain.
    #[error("Parameter {parameter} is not applicable to {family} options")]
    ParameterNotApplicable {
        /// Parameter name as used in sweeps and tables (e.g. `T`)
        parameter: String,
        /// Option family name
        family: String,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Measure has no implementation for the option family.
    #[error("Measure {measure} is not available for {family} options")]
    UnsupportedMeasure {
        /// Measure name as used in table headers (e.g. `Vega`)
        measure: String,
        /// Option family name
        family: String,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl PricingError {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a parameter-not-applicable error.
    pub fn parameter_not_applicable(
        parameter: impl Into<String>,
        family: impl Into<String>,
    ) -> Self {
        Self::ParameterNotApplicable {
            parameter: parameter.into(),
            family: family.into(),
        }
    }

    /// Create an unsupported measure error.
    pub fn unsupported_measure(measure: impl Into<String>, family: impl Into<String>) -> Self {
        Self::UnsupportedMeasure {
            measure: measure.into(),
            family: family.into(),
        }
    }

    /// Create a numerical instability error.
    pub fn numerical_instability(msg: impl Into<String>) -> Self {
        Self::NumericalInstability(msg.into())
    }

    /// Returns `true` when the error invalidates a whole configuration
    /// (every point of a sweep, every row of a batch) rather than one input.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::PricingError;
    ///
    /// assert!(PricingError::parameter_not_applicable("T", "AmericanPerpetual").is_configuration());
    /// assert!(!PricingError::invalid_input("sigma = 0").is_configuration());
    /// ```
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PricingError::ParameterNotApplicable { .. } | PricingError::UnsupportedMeasure { .. }
        )
    }
}

/// Result alias used throughout the pricer crates.
pub type PricingResult<T> = Result<T, PricingError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================
    // Display Tests
    // ==========================================================

    #[test]
    fn test_invalid_option_kind_display() {
        let err = PricingError::InvalidOptionKind("Straddle".to_string());
        assert_eq!(format!("{}", err), "Invalid option kind: Straddle");
    }

    #[test]
    fn test_parameter_not_applicable_display() {
        let err = PricingError::parameter_not_applicable("T", "AmericanPerpetual");
        assert_eq!(
            format!("{}", err),
            "Parameter T is not applicable to AmericanPerpetual options"
        );
    }

    #[test]
    fn test_invalid_input_display() {
        let err = PricingError::invalid_input("volatility must be positive");
        assert_eq!(
            format!("{}", err),
            "Invalid input: volatility must be positive"
        );
    }

    #[test]
    fn test_unsupported_measure_display() {
        let err = PricingError::unsupported_measure("Vega", "AmericanPerpetual");
        assert_eq!(
            format!("{}", err),
            "Measure Vega is not available for AmericanPerpetual options"
        );
    }

    #[test]
    fn test_numerical_instability_display() {
        let err = PricingError::numerical_instability("zero price");
        assert_eq!(format!("{}", err), "Numerical instability: zero price");
    }

    // ==========================================================
    // Classification Tests
    // ==========================================================

    #[test]
    fn test_configuration_errors() {
        assert!(PricingError::parameter_not_applicable("T", "AmericanPerpetual").is_configuration());
        assert!(PricingError::unsupported_measure("Rho", "AmericanPerpetual").is_configuration());
        assert!(!PricingError::InvalidOptionKind("x".into()).is_configuration());
        assert!(!PricingError::invalid_input("x").is_configuration());
        assert!(!PricingError::numerical_instability("x").is_configuration());
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::invalid_input("strike = 0");
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = PricingError::parameter_not_applicable("T", "AmericanPerpetual");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
