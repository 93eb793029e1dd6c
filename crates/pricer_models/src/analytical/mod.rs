//! Analytical pricing formulas.
//!
//! This module provides closed-form solutions for option pricing:
//! - Generalized Black-Scholes-Merton with cost of carry, with the full
//!   Greek catalogue up to third order
//! - Perpetual American options
//! - Put-call parity diagnostics
//!
//! ## Design Principles
//!
//! - **Validate once**: models check their domain at construction and
//!   return `AnalyticalError`; measure methods are then infallible except
//!   where a result is undefined (e.g. elasticity of a zero price)
//! - **Numerical Stability**: Uses erfc-based CDF for accuracy

pub mod distributions;
pub mod error;
pub mod generalized_bsm;
pub mod parity;
pub mod perpetual;

// Re-export main types at module level
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use generalized_bsm::GeneralizedBlackScholes;
pub use parity::ParityCheck;
pub use perpetual::PerpetualAmerican;
