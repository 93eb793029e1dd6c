//! Put-call parity diagnostics.

use pricer_core::types::{PricingError, PricingResult};

/// Outcome of comparing an observed opposite-kind price with the price
/// implied by put-call parity.
///
/// A check is a diagnostic: an arbitrage signal is reported through
/// `arbitrage`, never as an error.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParityCheck {
    /// Opposite-kind price implied by parity
    pub implied: f64,
    /// Externally observed opposite-kind price
    pub observed: f64,
    /// `observed - implied`
    pub difference: f64,
    /// Absolute tolerance the difference was compared against
    pub tolerance: f64,
    /// Whether `|difference| > tolerance`
    pub arbitrage: bool,
}

impl ParityCheck {
    /// Compares `observed` against `implied`.
    ///
    /// # Errors
    /// - `PricingError::InvalidInput` if `tolerance` is negative or either
    ///   price is not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::ParityCheck;
    ///
    /// let check = ParityCheck::new(5.8463, 5.9, 0.05).unwrap();
    /// assert!(check.arbitrage);
    /// assert!(!ParityCheck::new(5.8463, 5.85, 0.05).unwrap().arbitrage);
    /// ```
    pub fn new(implied: f64, observed: f64, tolerance: f64) -> PricingResult<Self> {
        if !(tolerance >= 0.0) {
            return Err(PricingError::invalid_input(format!(
                "parity tolerance must be non-negative: {}",
                tolerance
            )));
        }
        if !implied.is_finite() || !observed.is_finite() {
            return Err(PricingError::invalid_input(format!(
                "parity prices must be finite: implied = {}, observed = {}",
                implied, observed
            )));
        }

        let difference = observed - implied;
        Ok(Self {
            implied,
            observed,
            difference,
            tolerance,
            arbitrage: difference.abs() > tolerance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_within_tolerance() {
        let check = ParityCheck::new(2.1334, 2.1534, 0.05).unwrap();
        assert!(!check.arbitrage);
        assert_relative_eq!(check.difference, 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_outside_tolerance() {
        let check = ParityCheck::new(2.1334, 2.5534, 0.05).unwrap();
        assert!(check.arbitrage);
        assert_relative_eq!(check.difference, 0.42, epsilon = 1e-12);
    }

    #[test]
    fn test_difference_sign_does_not_matter() {
        assert!(ParityCheck::new(2.5, 2.0, 0.1).unwrap().arbitrage);
        assert!(ParityCheck::new(2.0, 2.5, 0.1).unwrap().arbitrage);
    }

    #[test]
    fn test_zero_tolerance_exact_match() {
        assert!(!ParityCheck::new(1.0, 1.0, 0.0).unwrap().arbitrage);
    }

    #[test]
    fn test_invalid_tolerance() {
        assert!(matches!(
            ParityCheck::new(1.0, 1.0, -0.1),
            Err(PricingError::InvalidInput(_))
        ));
        assert!(ParityCheck::new(1.0, 1.0, f64::NAN).is_err());
        assert!(ParityCheck::new(f64::NAN, 1.0, 0.1).is_err());
    }
}
