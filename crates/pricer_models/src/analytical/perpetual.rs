//! Perpetual American options under the cost-of-carry model.
//!
//! An American option without expiry has a time-independent value. With
//! `σ²` the variance and `b` the cost of carry, the roots of the
//! fundamental quadratic are
//!
//! ```text
//! Y₁,₂ = 1/2 - b/σ² ± √((b/σ² - 1/2)² + 2r/σ²)
//! ```
//!
//! The call uses `Y₁` and is exercised once `S ≥ S* = K·Y₁/(Y₁ - 1)`;
//! the put uses `Y₂` and is exercised once `S ≤ S* = K·Y₂/(Y₂ - 1)`.
//! Before exercise:
//!
//! ```text
//! Call = K/(Y₁ - 1) · ((Y₁ - 1)/Y₁ · S/K)^Y₁
//! Put  = K/(1 - Y₂) · ((Y₂ - 1)/Y₂ · S/K)^Y₂
//! ```
//!
//! When `b ≥ r` the call is never exercised (`Y₁ ≤ 1`) and its value is
//! the limiting value `S`. When `r ≤ 0` the put has no finite boundary.

use super::error::AnalyticalError;
use crate::instruments::OptionKind;

/// Closed-form perpetual American option model.
///
/// # Examples
/// ```
/// use pricer_models::analytical::PerpetualAmerican;
/// use pricer_models::instruments::OptionKind;
///
/// let model = PerpetualAmerican::new(110.0, 100.0, 0.1, 0.02, 0.1).unwrap();
/// let call = model.price(OptionKind::Call).unwrap();
/// assert!((call - 18.5035).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerpetualAmerican {
    spot: f64,
    strike: f64,
    rate: f64,
    carry: f64,
    volatility: f64,
}

impl PerpetualAmerican {
    /// Creates a perpetual American model.
    ///
    /// # Arguments
    /// * `spot` - Spot price (non-negative)
    /// * `strike` - Strike price (positive)
    /// * `rate` - Risk-free rate
    /// * `carry` - Cost of carry
    /// * `volatility` - Volatility (positive)
    ///
    /// # Errors
    /// Returns `AnalyticalError` if any input is outside the domain above.
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        carry: f64,
        volatility: f64,
    ) -> Result<Self, AnalyticalError> {
        if !(volatility > 0.0) || !volatility.is_finite() {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        if !(strike > 0.0) || !strike.is_finite() {
            return Err(AnalyticalError::InvalidStrike { strike });
        }
        if !(spot >= 0.0) || !spot.is_finite() {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if !rate.is_finite() {
            return Err(AnalyticalError::InvalidMarketData {
                name: "r",
                value: rate,
            });
        }
        if !carry.is_finite() {
            return Err(AnalyticalError::InvalidMarketData {
                name: "b",
                value: carry,
            });
        }

        Ok(Self {
            spot,
            strike,
            rate,
            carry,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns `(b/σ² - 1/2, √((b/σ² - 1/2)² + 2r/σ²))`.
    fn roots_parts(&self) -> Result<(f64, f64), AnalyticalError> {
        let variance = self.volatility * self.volatility;
        let centre = self.carry / variance - 0.5;
        let discriminant = centre * centre + 2.0 * self.rate / variance;
        if discriminant < 0.0 {
            return Err(AnalyticalError::NoFiniteExercise {
                reason: format!(
                    "negative discriminant {} for r = {}, b = {}, sigma = {}",
                    discriminant, self.rate, self.carry, self.volatility
                ),
            });
        }
        Ok((centre, discriminant.sqrt()))
    }

    /// Upper root `Y₁` of the fundamental quadratic.
    ///
    /// # Errors
    /// `AnalyticalError::NoFiniteExercise` if the roots are complex.
    pub fn y1(&self) -> Result<f64, AnalyticalError> {
        let (centre, root) = self.roots_parts()?;
        Ok(-centre + root)
    }

    /// Lower root `Y₂` of the fundamental quadratic.
    ///
    /// # Errors
    /// `AnalyticalError::NoFiniteExercise` if the roots are complex.
    pub fn y2(&self) -> Result<f64, AnalyticalError> {
        let (centre, root) = self.roots_parts()?;
        Ok(-centre - root)
    }

    /// Optimal exercise boundary `S*`.
    ///
    /// # Errors
    /// `AnalyticalError::NoFiniteExercise` when the option is never
    /// exercised early (call with `b ≥ r`, put with `r ≤ 0`).
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::PerpetualAmerican;
    /// use pricer_models::instruments::OptionKind;
    ///
    /// let model = PerpetualAmerican::new(110.0, 100.0, 0.1, 0.02, 0.1).unwrap();
    /// let boundary = model.exercise_boundary(OptionKind::Call).unwrap();
    /// assert!((boundary - 145.106).abs() < 1e-3);
    /// ```
    pub fn exercise_boundary(&self, kind: OptionKind) -> Result<f64, AnalyticalError> {
        match kind {
            OptionKind::Call => {
                let y1 = self.y1()?;
                if !(y1 > 1.0) {
                    return Err(AnalyticalError::NoFiniteExercise {
                        reason: format!(
                            "call with b = {} >= r = {} is never exercised early",
                            self.carry, self.rate
                        ),
                    });
                }
                Ok(self.strike * y1 / (y1 - 1.0))
            }
            OptionKind::Put => {
                let y2 = self.y2()?;
                if !(y2 < 0.0) {
                    return Err(AnalyticalError::NoFiniteExercise {
                        reason: format!("put with r = {} <= 0 is never exercised", self.rate),
                    });
                }
                Ok(self.strike * y2 / (y2 - 1.0))
            }
        }
    }

    /// Computes the perpetual option price.
    ///
    /// # Errors
    /// - `AnalyticalError::NoFiniteExercise` for a put with `r ≤ 0`, or when
    ///   the roots of the fundamental quadratic are complex
    pub fn price(&self, kind: OptionKind) -> Result<f64, AnalyticalError> {
        match kind {
            OptionKind::Call => {
                let y1 = self.y1()?;
                if !(y1 > 1.0) {
                    return Ok(self.spot);
                }
                let boundary = self.strike * y1 / (y1 - 1.0);
                if self.spot >= boundary {
                    return Ok(self.spot - self.strike);
                }
                Ok(self.strike / (y1 - 1.0)
                    * ((y1 - 1.0) / y1 * self.spot / self.strike).powf(y1))
            }
            OptionKind::Put => {
                let boundary = self.exercise_boundary(kind)?;
                if self.spot <= boundary {
                    return Ok(self.strike - self.spot);
                }
                let y2 = self.y2()?;
                Ok(self.strike / (1.0 - y2)
                    * ((y2 - 1.0) / y2 * self.spot / self.strike).powf(y2))
            }
        }
    }
}
