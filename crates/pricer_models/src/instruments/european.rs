//! European option record.

use pricer_core::traits::Priceable;
use pricer_core::types::{PricingError, PricingResult};
use tracing::info;

use super::kind::OptionKind;
use super::parameter::{OptionFamily, OptionParameter};
use super::record::OptionRecord;
use crate::analytical::{GeneralizedBlackScholes, ParityCheck};
use crate::measures::Measure;

/// European option under the generalized Black-Scholes-Merton model.
///
/// The cost of carry defaults to the rate when the record is built, i.e.
/// a non-dividend stock. It is stored resolved, so a later
/// [`with_rate`](EuropeanOption::with_rate) does not move it. Pass the carry
/// explicitly for futures (`b = 0`), dividend stocks (`b = r - q`) or
/// currencies (`b = r - r_f`).
///
/// Inputs are not validated when set. The domain (`σ > 0`, `T > 0`,
/// `K > 0`, `S ≥ 0`) is checked whenever the record is valued.
///
/// # Examples
/// ```
/// use pricer_core::traits::Priceable;
/// use pricer_models::instruments::{EuropeanOption, OptionKind, OptionRecord};
/// use pricer_models::measures::Measure;
///
/// let call = EuropeanOption::new(OptionKind::Call, 0.25, 65.0, 60.0, 0.08, 0.3).with_id(1);
/// assert!((call.price().unwrap() - 2.1334).abs() < 1e-4);
///
/// let put = call.with_kind(OptionKind::Put);
/// let delta = put.evaluate(Measure::Delta).unwrap();
/// assert!(delta < 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EuropeanOption {
    id: u64,
    kind: OptionKind,
    expiry: f64,
    strike: f64,
    spot: f64,
    rate: f64,
    volatility: f64,
    carry: f64,
}

impl EuropeanOption {
    /// Creates a record with `id = 0` and `carry = rate`.
    pub fn new(
        kind: OptionKind,
        expiry: f64,
        strike: f64,
        spot: f64,
        rate: f64,
        volatility: f64,
    ) -> Self {
        Self {
            id: 0,
            kind,
            expiry,
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

    /// Sets the time to expiry.
    pub fn with_expiry(mut self, expiry: f64) -> Self {
        self.expiry = expiry;
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

    /// Time to expiry in years.
    pub fn expiry(&self) -> f64 {
        self.expiry
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
    ///
    /// # Errors
    /// `PricingError::InvalidInput` if the inputs leave the model's domain.
    pub fn model(&self) -> PricingResult<GeneralizedBlackScholes> {
        Ok(GeneralizedBlackScholes::new(
            self.spot,
            self.strike,
            self.expiry,
            self.rate,
            self.carry,
            self.volatility,
        )?)
    }

    /// Price of the opposite-kind option implied by put-call parity.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` if the inputs leave the model's domain.
    pub fn price_put_call_parity(&self) -> PricingResult<f64> {
        Ok(self.model()?.parity_price(self.kind))
    }

    /// Compares an observed opposite-kind price with the parity-implied one.
    ///
    /// An arbitrage signal is returned in the [`ParityCheck`] and logged; it
    /// is not an error.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` for a negative tolerance or inputs
    /// outside the model's domain.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::{EuropeanOption, OptionKind};
    ///
    /// let put = EuropeanOption::new(OptionKind::Put, 0.25, 65.0, 60.0, 0.08, 0.3);
    /// assert!(!put.check_put_call_parity(2.1534, 0.05).unwrap().arbitrage);
    /// assert!(put.check_put_call_parity(2.5534, 0.05).unwrap().arbitrage);
    /// ```
    pub fn check_put_call_parity(&self, observed: f64, tolerance: f64) -> PricingResult<ParityCheck> {
        let implied = self.price_put_call_parity()?;
        let check = ParityCheck::new(implied, observed, tolerance)?;
        if check.arbitrage {
            info!(
                id = self.id,
                kind = %self.kind,
                implied = check.implied,
                observed = check.observed,
                difference = check.difference,
                tolerance = check.tolerance,
                "Put-call parity violated: arbitrage opportunity"
            );
        }
        Ok(check)
    }
}

impl Priceable<f64> for EuropeanOption {
    fn price(&self) -> Result<f64, PricingError> {
        Ok(self.model()?.price(self.kind))
    }
}

impl OptionRecord for EuropeanOption {
    const FAMILY: OptionFamily = OptionFamily::European;

    fn id(&self) -> u64 {
        self.id
    }

    fn kind(&self) -> OptionKind {
        self.kind
    }

    fn parameter(&self, parameter: OptionParameter) -> PricingResult<f64> {
        Ok(match parameter {
            OptionParameter::Expiry => self.expiry,
            OptionParameter::Strike => self.strike,
            OptionParameter::Spot => self.spot,
            OptionParameter::Rate => self.rate,
            OptionParameter::Volatility => self.volatility,
            OptionParameter::Carry => self.carry,
        })
    }

    fn with_parameter(&self, parameter: OptionParameter, value: f64) -> PricingResult<Self> {
        let copy = *self;
        Ok(match parameter {
            OptionParameter::Expiry => copy.with_expiry(value),
            OptionParameter::Strike => copy.with_strike(value),
            OptionParameter::Spot => copy.with_spot(value),
            OptionParameter::Rate => copy.with_rate(value),
            OptionParameter::Volatility => copy.with_volatility(value),
            OptionParameter::Carry => copy.with_carry(value),
        })
    }

    fn evaluate(&self, measure: Measure) -> PricingResult<f64> {
        let model = self.model()?;
        let kind = self.kind;
        let name = measure.name();
        Ok(match measure {
            Measure::Price => model.price(kind),
            Measure::PricePutCallParity => model.parity_price(kind),
            Measure::Delta => model.delta(kind),
            Measure::Gamma => model.require_positive_spot(name)?.gamma(),
            Measure::Vega => model.vega(),
            Measure::Theta => model.theta(kind),
            Measure::Rho => model.rho(kind),
            Measure::Vanna => model.require_positive_spot(name)?.vanna(),
            Measure::Charm => model.require_positive_spot(name)?.charm(kind),
            Measure::Speed => model.require_positive_spot(name)?.speed(),
            Measure::Color => model.require_positive_spot(name)?.color(),
            Measure::DvegaDtime => model.require_positive_spot(name)?.dvega_dtime(),
            Measure::Vomma => model.require_positive_spot(name)?.vomma(),
            Measure::Veta => model.require_positive_spot(name)?.veta(),
            Measure::Zomma => model.require_positive_spot(name)?.zomma(),
            Measure::Lambda => model.lambda(kind)?,
            Measure::Ultima => model.require_positive_spot(name)?.ultima(),
        })
    }
}
