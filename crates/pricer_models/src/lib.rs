//! # Pricer Models (L2: Business Logic)
//!
//! Option records and their closed-form valuation.
//!
//! This crate provides:
//! - Option records for the European and perpetual American families
//! - The [`measures`] catalogue selecting what an engine computes
//! - Generalized Black-Scholes-Merton prices and Greeks up to third order
//! - Perpetual American prices and exercise boundaries
//! - Put-call parity diagnostics
//!
//! ## Design Principles
//!
//! - **Static dispatch**: engines are generic over
//!   [`instruments::OptionRecord`]; operations are closed enums
//! - **Overridden copies**: records are never mutated in place by engines
//! - **Validate on evaluation**: record setters accept any value and the
//!   domain is checked when a measure is computed
//!
//! ## Example
//!
//! ```
//! use pricer_models::instruments::{EuropeanOption, OptionKind, OptionRecord};
//! use pricer_models::measures::{Measure, SteppedMeasure};
//!
//! let option = EuropeanOption::new(OptionKind::Call, 0.5, 100.0, 105.0, 0.1, 0.36)
//!     .with_carry(0.0);
//!
//! let delta = option.evaluate(Measure::Delta).unwrap();
//! let numeric = option.evaluate_stepped(SteppedMeasure::NumericDelta, 0.001).unwrap();
//! assert!((delta - numeric).abs() < 1e-6);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod measures;
