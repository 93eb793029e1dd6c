//! # pricer_core: Foundation for the Option Batch Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Error types: `PricingError` (`types::error`)
//! - Traits for pricing (`traits::priceable`)
//! - Central finite-difference helpers (`math::finite_difference`)
//! - Parameter grid generation for sweeps (`math::grid`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::finite_difference::try_central_first;
//! use pricer_core::math::grid::stepped_grid;
//!
//! // d/dx x² at x = 3 is 6
//! let slope = try_central_first(|x: f64| Ok::<_, ()>(x * x), 3.0, 1e-3).unwrap();
//! assert!((slope - 6.0).abs() < 1e-8);
//!
//! // 10, 15, ..., 200
//! let grid = stepped_grid(10.0, 200.0, 5.0).unwrap();
//! assert_eq!(grid.len(), 39);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `PricingError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
