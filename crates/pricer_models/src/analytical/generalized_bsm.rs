//! Generalized Black-Scholes-Merton model with cost of carry.
//!
//! Closed-form price and sensitivities of European options where the
//! underlying earns the cost of carry `b`:
//!
//! - `b = r`: Black-Scholes (1973) non-dividend stock
//! - `b = r - q`: Merton (1973) stock with continuous dividend yield `q`
//! - `b = 0`: Black (1976) option on a future
//! - `b = r - r_f`: Garman-Kohlhagen (1983) currency option
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^((b-r)T)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^((b-r)T)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (b + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Sign Conventions
//!
//! Time-decay measures (`theta`, `charm`, `color`, `dvega_dtime`) are
//! derivatives with respect to calendar time, i.e. `-∂/∂T`, quoted per year.
//! `veta` is the derivative of vega with respect to `T` itself. `rho` moves
//! `r` and `b` together, i.e. the dividend yield `r - b` is held fixed.

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::OptionKind;

/// Generalized Black-Scholes-Merton model for one set of option inputs.
///
/// The model captures spot, strike, expiry, rate, carry and volatility and
/// precomputes `d₁`, `d₂` and the discount factors once. Every measure is a
/// method taking the option kind where calls and puts differ.
///
/// # Examples
/// ```
/// use pricer_models::analytical::GeneralizedBlackScholes;
/// use pricer_models::instruments::OptionKind;
///
/// // Hull's textbook example: S = 60, K = 65, T = 0.25, r = b = 8%, σ = 30%
/// let model = GeneralizedBlackScholes::new(60.0, 65.0, 0.25, 0.08, 0.08, 0.3).unwrap();
/// let call = model.price(OptionKind::Call);
/// assert!((call - 2.1334).abs() < 1e-4);
///
/// // Put-call parity: C - P = S·e^((b-r)T) - K·e^(-rT)
/// let put = model.price(OptionKind::Put);
/// assert!((call - put - model.forward_value()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneralizedBlackScholes {
    /// Spot price (S)
    spot: f64,
    /// Strike price (K)
    strike: f64,
    /// Time to expiry in years (T)
    expiry: f64,
    /// Risk-free interest rate (r)
    rate: f64,
    /// Cost of carry (b)
    carry: f64,
    /// Volatility (σ)
    volatility: f64,
    /// √T
    sqrt_t: f64,
    /// d₁
    d1: f64,
    /// d₂
    d2: f64,
    /// e^((b-r)T)
    carry_factor: f64,
    /// e^(-rT)
    discount: f64,
}

impl GeneralizedBlackScholes {
    /// Creates a new generalized Black-Scholes-Merton model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be non-negative; zero gives limiting values)
    /// * `strike` - Strike price (must be positive)
    /// * `expiry` - Time to expiry in years (must be positive)
    /// * `rate` - Risk-free interest rate (annualised)
    /// * `carry` - Cost of carry (annualised)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    /// - `AnalyticalError::InvalidExpiry` if expiry <= 0
    /// - `AnalyticalError::InvalidStrike` if strike <= 0
    /// - `AnalyticalError::InvalidSpot` if spot < 0
    /// - `AnalyticalError::InvalidMarketData` if rate or carry is not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::GeneralizedBlackScholes;
    ///
    /// assert!(GeneralizedBlackScholes::new(100.0, 100.0, 1.0, 0.05, 0.05, 0.2).is_ok());
    /// assert!(GeneralizedBlackScholes::new(100.0, 100.0, 1.0, 0.05, 0.05, 0.0).is_err());
    /// assert!(GeneralizedBlackScholes::new(100.0, 100.0, 0.0, 0.05, 0.05, 0.2).is_err());
    /// ```
    pub fn new(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        carry: f64,
        volatility: f64,
    ) -> Result<Self, AnalyticalError> {
        if !(volatility > 0.0) || !volatility.is_finite() {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        if !(expiry > 0.0) || !expiry.is_finite() {
            return Err(AnalyticalError::InvalidExpiry { expiry });
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

        let sqrt_t = expiry.sqrt();
        let vol_sqrt_t = volatility * sqrt_t;
        let d1 = ((spot / strike).ln() + (carry + 0.5 * volatility * volatility) * expiry)
            / vol_sqrt_t;
        let d2 = d1 - vol_sqrt_t;

        Ok(Self {
            spot,
            strike,
            expiry,
            rate,
            carry,
            volatility,
            sqrt_t,
            d1,
            d2,
            carry_factor: ((carry - rate) * expiry).exp(),
            discount: (-rate * expiry).exp(),
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

    /// Returns the time to expiry.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the cost of carry.
    #[inline]
    pub fn carry(&self) -> f64 {
        self.carry
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// d₁ = (ln(S/K) + (b + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self) -> f64 {
        self.d1
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self) -> f64 {
        self.d2
    }

    /// Carry factor e^((b-r)T).
    #[inline]
    pub fn carry_factor(&self) -> f64 {
        self.carry_factor
    }

    /// Discount factor e^(-rT).
    #[inline]
    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Value of the parity portfolio, C - P = S·e^((b-r)T) - K·e^(-rT).
    #[inline]
    pub fn forward_value(&self) -> f64 {
        self.spot * self.carry_factor - self.strike * self.discount
    }

    /// Computes the option price.
    ///
    /// - Call: S·e^((b-r)T)·N(d₁) - K·e^(-rT)·N(d₂)
    /// - Put: K·e^(-rT)·N(-d₂) - S·e^((b-r)T)·N(-d₁)
    #[inline]
    pub fn price(&self, kind: OptionKind) -> f64 {
        match kind {
            OptionKind::Call => {
                self.spot * self.carry_factor * norm_cdf(self.d1)
                    - self.strike * self.discount * norm_cdf(self.d2)
            }
            OptionKind::Put => {
                self.strike * self.discount * norm_cdf(-self.d2)
                    - self.spot * self.carry_factor * norm_cdf(-self.d1)
            }
        }
    }

    /// Price of the opposite-kind option implied by put-call parity.
    ///
    /// Given this model's `kind` price, returns
    /// - for a call: P = C - (S·e^((b-r)T) - K·e^(-rT))
    /// - for a put: C = P + (S·e^((b-r)T) - K·e^(-rT))
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::GeneralizedBlackScholes;
    /// use pricer_models::instruments::OptionKind;
    ///
    /// let model = GeneralizedBlackScholes::new(60.0, 65.0, 0.25, 0.08, 0.08, 0.3).unwrap();
    /// let implied_put = model.parity_price(OptionKind::Call);
    /// assert!((implied_put - model.price(OptionKind::Put)).abs() < 1e-10);
    /// ```
    #[inline]
    pub fn parity_price(&self, kind: OptionKind) -> f64 {
        let price = self.price(kind);
        match kind {
            OptionKind::Call => price - self.forward_value(),
            OptionKind::Put => price + self.forward_value(),
        }
    }

    /// Guards measures that are undefined at `S = 0`.
    ///
    /// With zero spot `d₁` is infinite, so every measure that scales `φ(d₁)`
    /// by `d₁`, `d₂` or `1/S` evaluates `0·∞` or `0/0`. Price, Delta, Vega,
    /// Theta and Rho keep their limits and need no guard.
    ///
    /// # Errors
    /// - `AnalyticalError::NumericalInstability` if `S = 0`
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::GeneralizedBlackScholes;
    ///
    /// let model = GeneralizedBlackScholes::new(0.0, 100.0, 1.0, 0.05, 0.05, 0.2).unwrap();
    /// assert!(model.require_positive_spot("Gamma").is_err());
    /// ```
    pub fn require_positive_spot(&self, measure: &str) -> Result<&Self, AnalyticalError> {
        if self.spot > 0.0 {
            Ok(self)
        } else {
            Err(AnalyticalError::NumericalInstability {
                message: format!("{} undefined at S = {}", measure, self.spot),
            })
        }
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = e^((b-r)T)·N(d₁)
    /// - Put Delta = e^((b-r)T)·(N(d₁) - 1)
    #[inline]
    pub fn delta(&self, kind: OptionKind) -> f64 {
        match kind {
            OptionKind::Call => self.carry_factor * norm_cdf(self.d1),
            OptionKind::Put => -self.carry_factor * norm_cdf(-self.d1),
        }
    }

    /// Computes Gamma (∂²V/∂S²).
    ///
    /// Gamma = e^((b-r)T)·φ(d₁) / (S·σ·√T), identical for calls and puts.
    #[inline]
    pub fn gamma(&self) -> f64 {
        self.carry_factor * norm_pdf(self.d1) / (self.spot * self.volatility * self.sqrt_t)
    }

    /// Computes Vega (∂V/∂σ).
    ///
    /// Vega = S·e^((b-r)T)·φ(d₁)·√T, identical for calls and puts.
    #[inline]
    pub fn vega(&self) -> f64 {
        self.spot * self.carry_factor * norm_pdf(self.d1) * self.sqrt_t
    }

    /// Computes Theta (-∂V/∂T), per year.
    ///
    /// - Call: -S·e^((b-r)T)·φ(d₁)·σ/(2√T) - (b-r)·S·e^((b-r)T)·N(d₁) - r·K·e^(-rT)·N(d₂)
    /// - Put: -S·e^((b-r)T)·φ(d₁)·σ/(2√T) + (b-r)·S·e^((b-r)T)·N(-d₁) + r·K·e^(-rT)·N(-d₂)
    #[inline]
    pub fn theta(&self, kind: OptionKind) -> f64 {
        let s_carry = self.spot * self.carry_factor;
        let decay = -s_carry * norm_pdf(self.d1) * self.volatility / (2.0 * self.sqrt_t);
        let b_minus_r = self.carry - self.rate;

        match kind {
            OptionKind::Call => {
                decay
                    - b_minus_r * s_carry * norm_cdf(self.d1)
                    - self.rate * self.strike * self.discount * norm_cdf(self.d2)
            }
            OptionKind::Put => {
                decay
                    + b_minus_r * s_carry * norm_cdf(-self.d1)
                    + self.rate * self.strike * self.discount * norm_cdf(-self.d2)
            }
        }
    }

    /// Computes Rho (∂V/∂r with r - b held fixed).
    ///
    /// - Call Rho = T·K·e^(-rT)·N(d₂)
    /// - Put Rho = -T·K·e^(-rT)·N(-d₂)
    #[inline]
    pub fn rho(&self, kind: OptionKind) -> f64 {
        let tk_discount = self.expiry * self.strike * self.discount;
        match kind {
            OptionKind::Call => tk_discount * norm_cdf(self.d2),
            OptionKind::Put => -tk_discount * norm_cdf(-self.d2),
        }
    }

    /// Computes Vanna (∂²V/∂S∂σ).
    ///
    /// Vanna = -e^((b-r)T)·φ(d₁)·d₂/σ, identical for calls and puts.
    #[inline]
    pub fn vanna(&self) -> f64 {
        -self.carry_factor * norm_pdf(self.d1) * self.d2 / self.volatility
    }

    /// Computes Charm (-∂Δ/∂T), the delta decay per year.
    ///
    /// - Call: -e^((b-r)T)·[φ(d₁)·(b/(σ√T) - d₂/(2T)) + (b-r)·N(d₁)]
    /// - Put: -e^((b-r)T)·[φ(d₁)·(b/(σ√T) - d₂/(2T)) - (b-r)·N(-d₁)]
    #[inline]
    pub fn charm(&self, kind: OptionKind) -> f64 {
        let drift = norm_pdf(self.d1)
            * (self.carry / (self.volatility * self.sqrt_t) - self.d2 / (2.0 * self.expiry));
        let b_minus_r = self.carry - self.rate;

        match kind {
            OptionKind::Call => -self.carry_factor * (drift + b_minus_r * norm_cdf(self.d1)),
            OptionKind::Put => -self.carry_factor * (drift - b_minus_r * norm_cdf(-self.d1)),
        }
    }

    /// Computes Speed (∂Γ/∂S).
    ///
    /// Speed = -Γ·(1 + d₁/(σ√T)) / S, identical for calls and puts.
    #[inline]
    pub fn speed(&self) -> f64 {
        -self.gamma() * (1.0 + self.d1 / (self.volatility * self.sqrt_t)) / self.spot
    }

    /// Computes Color (-∂Γ/∂T), the gamma decay per year.
    ///
    /// Color = Γ·[r - b + b·d₁/(σ√T) + (1 - d₁·d₂)/(2T)], identical for calls and puts.
    #[inline]
    pub fn color(&self) -> f64 {
        self.gamma()
            * (self.rate - self.carry
                + self.carry * self.d1 / (self.volatility * self.sqrt_t)
                + (1.0 - self.d1 * self.d2) / (2.0 * self.expiry))
    }

    /// Computes DvegaDtime (-∂Vega/∂T), the vega decay per year.
    ///
    /// DvegaDtime = Vega·[r - b + b·d₁/(σ√T) - (1 + d₁·d₂)/(2T)], identical for calls and puts.
    #[inline]
    pub fn dvega_dtime(&self) -> f64 {
        self.vega()
            * (self.rate - self.carry
                + self.carry * self.d1 / (self.volatility * self.sqrt_t)
                - (1.0 + self.d1 * self.d2) / (2.0 * self.expiry))
    }

    /// Computes Vomma (∂²V/∂σ²).
    ///
    /// Vomma = Vega·d₁·d₂/σ, identical for calls and puts.
    #[inline]
    pub fn vomma(&self) -> f64 {
        self.vega() * self.d1 * self.d2 / self.volatility
    }

    /// Computes Veta (∂Vega/∂T).
    ///
    /// Veta = -Vega·[r - b + b·d₁/(σ√T) - (1 + d₁·d₂)/(2T)], identical for calls and puts.
    #[inline]
    pub fn veta(&self) -> f64 {
        -self.vega()
            * (self.rate - self.carry
                + self.carry * self.d1 / (self.volatility * self.sqrt_t)
                - (1.0 + self.d1 * self.d2) / (2.0 * self.expiry))
    }

    /// Computes Zomma (∂Γ/∂σ).
    ///
    /// Zomma = Γ·(d₁·d₂ - 1)/σ, identical for calls and puts.
    #[inline]
    pub fn zomma(&self) -> f64 {
        self.gamma() * (self.d1 * self.d2 - 1.0) / self.volatility
    }

    /// Computes Lambda (elasticity), Δ·S / V.
    ///
    /// # Errors
    /// - `AnalyticalError::NumericalInstability` if the option price is not
    ///   strictly positive (elasticity is undefined)
    pub fn lambda(&self, kind: OptionKind) -> Result<f64, AnalyticalError> {
        let price = self.price(kind);
        if !(price > 0.0) {
            return Err(AnalyticalError::NumericalInstability {
                message: format!("lambda undefined for non-positive {} price {}", kind, price),
            });
        }
        Ok(self.delta(kind) * self.spot / price)
    }

    /// Computes Ultima (∂Vomma/∂σ).
    ///
    /// Ultima = -Vega/σ²·[d₁·d₂·(1 - d₁·d₂) + d₁² + d₂²], identical for calls and puts.
    #[inline]
    pub fn ultima(&self) -> f64 {
        let d1d2 = self.d1 * self.d2;
        -self.vega() / (self.volatility * self.volatility)
            * (d1d2 * (1.0 - d1d2) + self.d1 * self.d1 + self.d2 * self.d2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;
    use OptionKind::{Call, Put};

    /// Parameters in the order (S, K, T, r, b, σ).
    type Inputs = (f64, f64, f64, f64, f64, f64);

    fn model(p: Inputs) -> GeneralizedBlackScholes {
        GeneralizedBlackScholes::new(p.0, p.1, p.2, p.3, p.4, p.5).unwrap()
    }

    /// Input sets covering stock, futures and dividend carry.
    const CASES: [Inputs; 4] = [
        (60.0, 65.0, 0.25, 0.08, 0.08, 0.3),
        (105.0, 100.0, 0.5, 0.1, 0.0, 0.36),
        (55.0, 60.0, 0.75, 0.105, 0.0695, 0.3),
        (100.0, 90.0, 2.0, 0.03, -0.01, 0.25),
    ];

    /// Central difference of `f` along one input, rebuilding the model.
    fn bump<F, G>(p: Inputs, h: f64, set: G, f: F) -> f64
    where
        F: Fn(&GeneralizedBlackScholes) -> f64,
        G: Fn(Inputs, f64) -> Inputs,
    {
        (f(&model(set(p, h))) - f(&model(set(p, -h)))) / (2.0 * h)
    }

    fn spot(p: Inputs, h: f64) -> Inputs {
        (p.0 + h, p.1, p.2, p.3, p.4, p.5)
    }

    fn expiry(p: Inputs, h: f64) -> Inputs {
        (p.0, p.1, p.2 + h, p.3, p.4, p.5)
    }

    fn vol(p: Inputs, h: f64) -> Inputs {
        (p.0, p.1, p.2, p.3, p.4, p.5 + h)
    }

    fn rate_and_carry(p: Inputs, h: f64) -> Inputs {
        (p.0, p.1, p.2, p.3 + h, p.4 + h, p.5)
    }

    // ==========================================================
    // Constructor Tests
    // ==========================================================

    #[test]
    fn test_new_valid_parameters() {
        let m = model(CASES[0]);
        assert_eq!(m.spot(), 60.0);
        assert_eq!(m.strike(), 65.0);
        assert_eq!(m.expiry(), 0.25);
        assert_eq!(m.rate(), 0.08);
        assert_eq!(m.carry(), 0.08);
        assert_eq!(m.volatility(), 0.3);
        assert_relative_eq!(m.d2(), m.d1() - 0.3 * 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_new_rejects_bad_inputs() {
        assert!(matches!(
            GeneralizedBlackScholes::new(100.0, 100.0, 1.0, 0.05, 0.05, 0.0),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
        assert!(matches!(
            GeneralizedBlackScholes::new(100.0, 100.0, 1.0, 0.05, 0.05, -0.2),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
        assert!(matches!(
            GeneralizedBlackScholes::new(100.0, 100.0, 0.0, 0.05, 0.05, 0.2),
            Err(AnalyticalError::InvalidExpiry { .. })
        ));
        assert!(matches!(
            GeneralizedBlackScholes::new(100.0, 0.0, 1.0, 0.05, 0.05, 0.2),
            Err(AnalyticalError::InvalidStrike { .. })
        ));
        assert!(matches!(
            GeneralizedBlackScholes::new(-1.0, 100.0, 1.0, 0.05, 0.05, 0.2),
            Err(AnalyticalError::InvalidSpot { .. })
        ));
        assert!(matches!(
            GeneralizedBlackScholes::new(100.0, 100.0, 1.0, f64::NAN, 0.05, 0.2),
            Err(AnalyticalError::InvalidMarketData { name: "r", .. })
        ));
        assert!(matches!(
            GeneralizedBlackScholes::new(100.0, 100.0, 1.0, 0.05, f64::INFINITY, 0.2),
            Err(AnalyticalError::InvalidMarketData { name: "b", .. })
        ));
    }

    // ==========================================================
    // Reference Prices
    // ==========================================================

    #[test]
    fn test_textbook_call_and_put() {
        let m = model(CASES[0]);
        assert_abs_diff_eq!(m.price(Call), 2.1334, epsilon = 1e-4);
        assert_abs_diff_eq!(m.price(Put), 5.8463, epsilon = 1e-4);
    }

    #[test]
    fn test_futures_option_delta() {
        let m = model(CASES[1]);
        assert_abs_diff_eq!(m.delta(Call), 0.5946, epsilon = 1e-4);
        assert_abs_diff_eq!(m.delta(Put), -0.3566, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_spot_limits() {
        let m = GeneralizedBlackScholes::new(0.0, 100.0, 1.0, 0.05, 0.05, 0.2).unwrap();
        assert_eq!(m.price(Call), 0.0);
        assert_relative_eq!(m.price(Put), 100.0 * (-0.05_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_deep_itm_call_approaches_forward() {
        let m = GeneralizedBlackScholes::new(1000.0, 10.0, 1.0, 0.05, 0.02, 0.2).unwrap();
        assert_relative_eq!(m.price(Call), m.forward_value(), epsilon = 1e-9);
        assert_relative_eq!(m.delta(Call), m.carry_factor(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_spot_guard() {
        let m = GeneralizedBlackScholes::new(0.0, 100.0, 1.0, 0.05, 0.05, 0.2).unwrap();
        assert!(matches!(
            m.require_positive_spot("Gamma"),
            Err(AnalyticalError::NumericalInstability { .. })
        ));
        // unguarded formulas produce NaN here
        assert!(m.gamma().is_nan());
        assert!(m.vomma().is_nan());

        let m = model(CASES[0]);
        assert_eq!(m.require_positive_spot("Gamma").unwrap().gamma(), m.gamma());
    }

    // ==========================================================
    // Put-Call Parity
    // ==========================================================

    #[test]
    fn test_parity_price_round_trip() {
        for p in CASES {
            let m = model(p);
            assert_relative_eq!(m.parity_price(Call), m.price(Put), epsilon = 1e-10);
            assert_relative_eq!(m.parity_price(Put), m.price(Call), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_delta_parity() {
        for p in CASES {
            let m = model(p);
            assert_relative_eq!(m.delta(Call) - m.delta(Put), m.carry_factor(), epsilon = 1e-12);
        }
    }

    // ==========================================================
    // Greeks vs Finite Differences
    // ==========================================================

    #[test]
    fn test_first_order_greeks_match_bumps() {
        for p in CASES {
            let m = model(p);
            for kind in [Call, Put] {
                let fd_delta = bump(p, 1e-4, spot, |m| m.price(kind));
                assert_relative_eq!(m.delta(kind), fd_delta, epsilon = 1e-6);

                let fd_vega = bump(p, 1e-5, vol, |m| m.price(kind));
                assert_relative_eq!(m.vega(), fd_vega, epsilon = 1e-5);

                let fd_theta = -bump(p, 1e-6, expiry, |m| m.price(kind));
                assert_relative_eq!(m.theta(kind), fd_theta, epsilon = 1e-4);

                let fd_rho = bump(p, 1e-6, rate_and_carry, |m| m.price(kind));
                assert_relative_eq!(m.rho(kind), fd_rho, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_gamma_matches_delta_bump() {
        for p in CASES {
            let m = model(p);
            let fd_gamma = bump(p, 1e-4, spot, |m| m.delta(Call));
            assert_relative_eq!(m.gamma(), fd_gamma, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_cross_greeks_match_bumps() {
        for p in CASES {
            let m = model(p);
            for kind in [Call, Put] {
                let fd_vanna = bump(p, 1e-5, vol, |m| m.delta(kind));
                assert_relative_eq!(m.vanna(), fd_vanna, epsilon = 1e-6);

                let fd_charm = -bump(p, 1e-6, expiry, |m| m.delta(kind));
                assert_relative_eq!(m.charm(kind), fd_charm, epsilon = 1e-5);
            }

            let fd_speed = bump(p, 1e-3, spot, |m| m.gamma());
            assert_relative_eq!(m.speed(), fd_speed, epsilon = 1e-8);

            let fd_color = -bump(p, 1e-6, expiry, |m| m.gamma());
            assert_relative_eq!(m.color(), fd_color, epsilon = 1e-6);

            let fd_veta = bump(p, 1e-6, expiry, |m| m.vega());
            assert_relative_eq!(m.veta(), fd_veta, epsilon = 1e-4);
            assert_relative_eq!(m.dvega_dtime(), -fd_veta, epsilon = 1e-4);

            let fd_vomma = bump(p, 1e-5, vol, |m| m.vega());
            assert_relative_eq!(m.vomma(), fd_vomma, epsilon = 1e-4);

            let fd_zomma = bump(p, 1e-5, vol, |m| m.gamma());
            assert_relative_eq!(m.zomma(), fd_zomma, epsilon = 1e-6);

            let fd_ultima = bump(p, 1e-5, vol, |m| m.vomma());
            assert_relative_eq!(m.ultima(), fd_ultima, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_lambda_is_elasticity() {
        let m = model(CASES[0]);
        let call_lambda = m.lambda(Call).unwrap();
        assert_relative_eq!(
            call_lambda,
            m.delta(Call) * 60.0 / m.price(Call),
            epsilon = 1e-12
        );
        assert!(call_lambda > 1.0);
        assert!(m.lambda(Put).unwrap() < 0.0);
    }

    #[test]
    fn test_lambda_undefined_on_zero_price() {
        let m = GeneralizedBlackScholes::new(0.0, 100.0, 1.0, 0.05, 0.05, 0.2).unwrap();
        assert!(matches!(
            m.lambda(Call),
            Err(AnalyticalError::NumericalInstability { .. })
        ));
    }

    // ==========================================================
    // Property-based tests
    // ==========================================================

    proptest! {
        #[test]
        fn prop_put_call_parity(
            s in 1.0_f64..500.0,
            k in 1.0_f64..500.0,
            t in 0.01_f64..5.0,
            r in -0.02_f64..0.15,
            b in -0.1_f64..0.15,
            sigma in 0.01_f64..1.5,
        ) {
            let m = GeneralizedBlackScholes::new(s, k, t, r, b, sigma).unwrap();
            let lhs = m.price(Call) - m.price(Put);
            let rhs = s * ((b - r) * t).exp() - k * (-r * t).exp();
            prop_assert!((lhs - rhs).abs() < 1e-6 * (1.0 + s.max(k)));
        }

        #[test]
        fn prop_prices_within_no_arbitrage_bounds(
            s in 1.0_f64..500.0,
            k in 1.0_f64..500.0,
            t in 0.01_f64..5.0,
            r in 0.0_f64..0.15,
            b in -0.1_f64..0.15,
            sigma in 0.01_f64..1.5,
        ) {
            let m = GeneralizedBlackScholes::new(s, k, t, r, b, sigma).unwrap();
            let tol = 1e-9 * (1.0 + s.max(k));
            prop_assert!(m.price(Call) >= -tol);
            prop_assert!(m.price(Put) >= -tol);
            prop_assert!(m.price(Call) <= s * m.carry_factor() + tol);
            prop_assert!(m.price(Put) <= k * m.discount() + tol);
            prop_assert!(m.gamma() >= 0.0);
            prop_assert!(m.vega() >= 0.0);
        }
    }
}
