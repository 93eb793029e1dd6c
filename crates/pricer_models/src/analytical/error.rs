//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors specific to the closed-form formulas

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// Raised when inputs leave the domain on which a closed form is defined.
///
/// # Variants
/// - `InvalidVolatility`: Non-positive or non-finite volatility
/// - `InvalidExpiry`: Non-positive or non-finite time to expiry
/// - `InvalidStrike`: Non-positive or non-finite strike
/// - `InvalidSpot`: Negative or non-finite spot
/// - `InvalidMarketData`: Non-finite rate or cost of carry
/// - `NoFiniteExercise`: Perpetual option has no finite exercise boundary
/// - `NumericalInstability`: Result undefined at these inputs
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid time to expiry (non-positive).
    #[error("Invalid time to expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Invalid strike (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid spot price (negative).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Non-finite rate or carry.
    #[error("Invalid market data: {name} = {value}")]
    InvalidMarketData {
        /// Parameter name
        name: &'static str,
        /// The invalid value
        value: f64,
    },

    /// No finite optimal exercise boundary exists.
    #[error("No finite exercise boundary: {reason}")]
    NoFiniteExercise {
        /// Description of why the boundary does not exist
        reason: String,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::NumericalInstability { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_volatility_display() {
        let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
        assert_eq!(format!("{}", err), "Invalid volatility: σ = -0.2");
    }

    #[test]
    fn test_invalid_expiry_display() {
        let err = AnalyticalError::InvalidExpiry { expiry: 0.0 };
        assert_eq!(format!("{}", err), "Invalid time to expiry: T = 0");
    }

    #[test]
    fn test_invalid_market_data_display() {
        let err = AnalyticalError::InvalidMarketData {
            name: "r",
            value: f64::NAN,
        };
        assert_eq!(format!("{}", err), "Invalid market data: r = NaN");
    }

    #[test]
    fn test_domain_errors_map_to_invalid_input() {
        let errors = [
            AnalyticalError::InvalidVolatility { volatility: 0.0 },
            AnalyticalError::InvalidExpiry { expiry: -1.0 },
            AnalyticalError::InvalidStrike { strike: 0.0 },
            AnalyticalError::InvalidSpot { spot: -5.0 },
            AnalyticalError::NoFiniteExercise {
                reason: "r <= 0".to_string(),
            },
        ];
        for err in errors {
            match PricingError::from(err) {
                PricingError::InvalidInput(_) => {}
                other => panic!("Expected InvalidInput, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_numerical_instability_to_pricing_error() {
        let err = AnalyticalError::NumericalInstability {
            message: "zero price".to_string(),
        };
        match PricingError::from(err) {
            PricingError::NumericalInstability(msg) => assert!(msg.contains("zero price")),
            other => panic!("Expected NumericalInstability, got {:?}", other),
        }
    }
}
