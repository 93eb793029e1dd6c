//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//!
//! The CDF is evaluated through the complementary error function from
//! `statrs`, which is accurate to near machine precision across the whole
//! real line. Polynomial approximations with errors around 1e-7 are not
//! good enough here: finite-difference Gammas divide price differences by
//! h², which amplifies any wobble in the CDF.

use statrs::function::erf::erfc;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal cumulative distribution function.
///
/// # Mathematical Definition
/// Φ(x) = (1/2) * erfc(-x / sqrt(2))
///
/// Saturates cleanly to 0 and 1 at ∓∞, so limiting cases such as a zero
/// spot (`ln(0) = -∞`) produce the correct limiting prices.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!(norm_cdf(-3.0) < 0.01);
/// assert!(norm_cdf(3.0) > 0.99);
/// assert_eq!(norm_cdf(f64::NEG_INFINITY), 0.0);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Standard normal probability density function.
///
/// # Mathematical Definition
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// // φ(0) = 1 / sqrt(2π) ≈ 0.3989
/// assert!((norm_pdf(0.0) - 0.3989422804).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}
