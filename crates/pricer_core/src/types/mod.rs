//! Core types shared by every layer.
//!
//! This module provides:
//! - `error`: Structured error types for valuation, sweep and batch operations
//!
//! # Re-exports
//!
//! For convenience, [`PricingError`] and [`PricingResult`] are re-exported at
//! this module level.

pub mod error;

pub use error::{PricingError, PricingResult};
