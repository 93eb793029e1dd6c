//! Perpetual American option record.

use pricer_core::traits::Priceable;
use pricer_core::types::{PricingError, PricingResult};

use super::kind::OptionKind;
use super::parameter::{OptionFamily, OptionParameter};
use super::record::OptionRecord;
use crate::analytical::PerpetualAmerican;
use crate::measures::Measure;

/// American option without expiry.
///
/// Carries no `T`: reading or overriding it fails with
/// `ParameterNotApplicable`. Only the price has a closed form; sensitivities
/// come from [`OptionRecord::numeric_delta`] and
/// [`OptionRecord::numeric_gamma`].
///
/// # Examples
/// ```
/// use pricer_core::traits::Priceable;
/// use pricer_models::instruments::{AmericanPerpetualOption, OptionKind, OptionParameter, OptionRecord};
///
/// let call = AmericanPerpetualOption::new(OptionKind::Call, 100.0, 110.0, 0.1, 0.1)
///     .with_carry(0.02)
///     .with_id(6);
/// assert!((call.price().unwrap() - 18.5035).abs() < 1e-4);
/// assert!(call.with_parameter(OptionParameter::Expiry, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmericanPerpetualOption {
    id: u64,
    kind: OptionKind,
    strike: f64,
    spot: f64,
    rate: f64,
    volatility: f64,
    carry: f64,
}

impl AmericanPerpetualOption {
    /// Creates a record with `id = 0` and `carry = rate`.
    pub fn new(kind: OptionKind, strike: f64, spot: f64, rate: f64, volatility: f64) -> Self {
        Self {
            id: 0,
            kind,
            strike,
            spot,
            rate,
            volatility,
            carry: rate,
        }
    }

    /// Sets the traceability id.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    /// Sets the kind.
    pub fn with_kind(mut self, kind: OptionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the strike.
    pub fn with_strike(mut self, strike: f64) -> Self {
        self.strike = strike;
        self
    }

    /// Sets the spot.
    pub fn with_spot(mut self, spot: f64) -> Self {
        self.spot = spot;
        self
    }

    /// Sets the rate. The carry is left unchanged.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Sets the volatility.
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Sets the cost of carry.
    pub fn with_carry(mut self, carry: f64) -> Self {
        self.carry = carry;
        self
    }

    /// Strike.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Spot.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Risk-free rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Volatility.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Cost of carry.
    pub fn carry(&self) -> f64 {
        self.carry
    }

    /// Builds the validated closed-form model at the current inputs.
    pub fn model(&self) -> PricingResult<PerpetualAmerican> {
        Ok(PerpetualAmerican::new(
            self.spot,
            self.strike,
            self.rate,
            self.carry,
            self.volatility,
        )?)
    }

    /// Spot level at which immediate exercise becomes optimal.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` when no finite boundary exists.
    pub fn exercise_boundary(&self) -> PricingResult<f64> {
        Ok(self.model()?.exercise_boundary(self.kind)?)
    }
}

impl Priceable<f64> for AmericanPerpetualOption {
    fn price(&self) -> Result<f64, PricingError> {
        Ok(self.model()?.price(self.kind)?)
    }
}

impl OptionRecord for AmericanPerpetualOption {
    const FAMILY: OptionFamily = OptionFamily::AmericanPerpetual;

    fn id(&self) -> u64 {
        self.id
    }

    fn kind(&self) -> OptionKind {
        self.kind
    }

    fn parameter(&self, parameter: OptionParameter) -> PricingResult<f64> {
        match parameter {
            OptionParameter::Expiry => Err(PricingError::parameter_not_applicable(
                parameter.symbol(),
                Self::FAMILY.name(),
            )),
            OptionParameter::Strike => Ok(self.strike),
            OptionParameter::Spot => Ok(self.spot),
            OptionParameter::Rate => Ok(self.rate),
            OptionParameter::Volatility => Ok(self.volatility),
            OptionParameter::Carry => Ok(self.carry),
        }
    }

    fn with_parameter(&self, parameter: OptionParameter, value: f64) -> PricingResult<Self> {
        let copy = *self;
        match parameter {
            OptionParameter::Expiry => Err(PricingError::parameter_not_applicable(
                parameter.symbol(),
                Self::FAMILY.name(),
            )),
            OptionParameter::Strike => Ok(copy.with_strike(value)),
            OptionParameter::Spot => Ok(copy.with_spot(value)),
            OptionParameter::Rate => Ok(copy.with_rate(value)),
            OptionParameter::Volatility => Ok(copy.with_volatility(value)),
            OptionParameter::Carry => Ok(copy.with_carry(value)),
        }
    }

    fn evaluate(&self, measure: Measure) -> PricingResult<f64> {
        match measure {
            Measure::Price => self.price(),
            other => Err(PricingError::unsupported_measure(
                other.name(),
                Self::FAMILY.name(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn reference_call() -> AmericanPerpetualOption {
        AmericanPerpetualOption::new(OptionKind::Call, 100.0, 110.0, 0.1, 0.1)
            .with_carry(0.02)
            .with_id(6)
    }

    // ==========================================================
    // Pricing
    // ==========================================================

    #[test]
    fn test_reference_prices() {
        let call = reference_call();
        let price = call.price().unwrap();
        assert_abs_diff_eq!(price, 18.5035, epsilon = 1e-4);
        assert!(price > 110.0 - 100.0);

        let put = call.with_kind(OptionKind::Put);
        assert_abs_diff_eq!(put.price().unwrap(), 3.0311, epsilon = 1e-4);
    }

    #[test]
    fn test_exercise_boundary() {
        assert_abs_diff_eq!(
            reference_call().exercise_boundary().unwrap(),
            145.1062,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_put_with_zero_rate_is_invalid() {
        let put = reference_call()
            .with_kind(OptionKind::Put)
            .with_rate(0.0)
            .with_carry(0.0);
        assert!(matches!(put.price(), Err(PricingError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_volatility_fails_on_evaluation() {
        let call = reference_call().with_volatility(0.0);
        assert!(matches!(call.price(), Err(PricingError::InvalidInput(_))));
    }

    // ==========================================================
    // Family restrictions
    // ==========================================================

    #[test]
    fn test_expiry_not_applicable() {
        let call = reference_call();
        for result in [
            call.parameter(OptionParameter::Expiry),
            call.with_parameter(OptionParameter::Expiry, 1.0).map(|c| c.spot()),
        ] {
            match result {
                Err(PricingError::ParameterNotApplicable { parameter, family }) => {
                    assert_eq!(parameter, "T");
                    assert_eq!(family, "AmericanPerpetual");
                }
                other => panic!("Expected ParameterNotApplicable, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_closed_form_greeks_unsupported() {
        let call = reference_call();
        assert!(call.evaluate(Measure::Price).is_ok());
        for measure in &Measure::ALL[1..] {
            assert!(matches!(
                call.evaluate(*measure),
                Err(PricingError::UnsupportedMeasure { .. })
            ));
        }
    }

    #[test]
    fn test_identity_row_has_no_expiry() {
        assert_eq!(
            reference_call().identity_row(),
            vec!["6", "Call", "100", "110", "0.1", "0.1", "0.02"]
        );
    }

    // ==========================================================
    // Numeric Greeks
    // ==========================================================

    #[test]
    fn test_numeric_greeks_below_boundary() {
        let call = reference_call();
        let delta = call.numeric_delta(0.5).unwrap();
        let gamma = call.numeric_gamma(0.5).unwrap();
        assert!(delta > 0.0 && delta < 1.0);
        assert!(gamma > 0.0);

        let fine = call.numeric_delta(1e-4).unwrap();
        assert_abs_diff_eq!(delta, fine, epsilon = 1e-3);
    }

    #[test]
    fn test_numeric_delta_beyond_boundary_is_one() {
        let call = reference_call().with_spot(180.0);
        assert_abs_diff_eq!(call.numeric_delta(0.5).unwrap(), 1.0, epsilon = 1e-12);
    }
}
