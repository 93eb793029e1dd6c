//! Numerical helpers shared by the valuation and sweep layers.
//!
//! This module provides:
//! - `finite_difference`: Central difference approximations of first and second derivatives
//! - `grid`: Ordered parameter grids for one-dimensional sweeps

pub mod finite_difference;
pub mod grid;
