//! Core traits for priceable instruments.
//!
//! This module defines fundamental abstractions for:
//! - Generic floating-point operations (`Float` trait)
//! - Price calculation (`Priceable` trait)
//!
//! Traits are designed for static dispatch: option families implement them
//! independently, and engines are generic over the implementing type.

/// Generic floating-point trait for numeric computations.
///
/// # Examples
/// ```
/// use pricer_core::traits::Float;
///
/// fn compute_discount<T: Float>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let discount_f64: f64 = compute_discount(0.05, 1.0);
/// assert!((discount_f64 - 0.951229).abs() < 1e-5);
/// ```
pub use num_traits::Float;

pub mod priceable;

pub use priceable::Priceable;
