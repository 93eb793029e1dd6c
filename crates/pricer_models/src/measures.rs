//! Catalogue of valuation operations.
//!
//! Engines select what to compute through these closed enums rather than
//! through function pointers, so every operation is statically dispatched
//! and has a stable column name.
//!
//! - [`Measure`]: zero-argument operations (price and closed-form Greeks)
//! - [`SteppedMeasure`]: finite-difference operations taking a shock size

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;

/// Zero-argument valuation operation.
///
/// # Examples
/// ```
/// use pricer_models::measures::Measure;
///
/// assert_eq!(Measure::ALL.len(), 17);
/// assert_eq!(Measure::BASIC.len(), 7);
/// assert_eq!("dvegadtime".parse::<Measure>().unwrap(), Measure::DvegaDtime);
/// assert_eq!(Measure::DvegaDtime.name(), "DvegaDtime");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    /// Option value
    Price,
    /// Opposite-kind price implied by put-call parity
    PricePutCallParity,
    /// ∂V/∂S
    Delta,
    /// ∂²V/∂S²
    Gamma,
    /// ∂V/∂σ
    Vega,
    /// -∂V/∂T
    Theta,
    /// ∂V/∂r
    Rho,
    /// ∂²V/∂S∂σ
    Vanna,
    /// -∂Δ/∂T
    Charm,
    /// ∂Γ/∂S
    Speed,
    /// -∂Γ/∂T
    Color,
    /// -∂Vega/∂T
    DvegaDtime,
    /// ∂²V/∂σ²
    Vomma,
    /// ∂Vega/∂T
    Veta,
    /// ∂Γ/∂σ
    Zomma,
    /// Δ·S/V
    Lambda,
    /// ∂Vomma/∂σ
    Ultima,
}

impl Measure {
    /// Columns of the `basic` batch mode.
    pub const BASIC: [Measure; 7] = [
        Measure::Price,
        Measure::PricePutCallParity,
        Measure::Delta,
        Measure::Gamma,
        Measure::Vega,
        Measure::Theta,
        Measure::Rho,
    ];

    /// Full closed-form catalogue, in output column order.
    pub const ALL: [Measure; 17] = [
        Measure::Price,
        Measure::PricePutCallParity,
        Measure::Delta,
        Measure::Gamma,
        Measure::Vega,
        Measure::Theta,
        Measure::Rho,
        Measure::Vanna,
        Measure::Charm,
        Measure::Speed,
        Measure::Color,
        Measure::DvegaDtime,
        Measure::Vomma,
        Measure::Veta,
        Measure::Zomma,
        Measure::Lambda,
        Measure::Ultima,
    ];

    /// Column name.
    pub fn name(self) -> &'static str {
        match self {
            Measure::Price => "Price",
            Measure::PricePutCallParity => "PricePutCallParity",
            Measure::Delta => "Delta",
            Measure::Gamma => "Gamma",
            Measure::Vega => "Vega",
            Measure::Theta => "Theta",
            Measure::Rho => "Rho",
            Measure::Vanna => "Vanna",
            Measure::Charm => "Charm",
            Measure::Speed => "Speed",
            Measure::Color => "Color",
            Measure::DvegaDtime => "DvegaDtime",
            Measure::Vomma => "Vomma",
            Measure::Veta => "Veta",
            Measure::Zomma => "Zomma",
            Measure::Lambda => "Lambda",
            Measure::Ultima => "Ultima",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Measure {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Measure::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| PricingError::invalid_input(format!("unknown measure: {}", s)))
    }
}

/// Finite-difference operation parameterised by a shock size `h`.
///
/// Both bump the spot symmetrically; the step is an accuracy trade-off left
/// to the caller (truncation bias for large `h`, cancellation for tiny `h`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SteppedMeasure {
    /// (V(S+h) - V(S-h)) / 2h
    NumericDelta,
    /// (V(S+h) - 2V(S) + V(S-h)) / h²
    NumericGamma,
}

impl SteppedMeasure {
    /// Both operations, in output column order.
    pub const ALL: [SteppedMeasure; 2] = [SteppedMeasure::NumericDelta, SteppedMeasure::NumericGamma];

    /// Column name.
    pub fn name(self) -> &'static str {
        match self {
            SteppedMeasure::NumericDelta => "NumericDelta",
            SteppedMeasure::NumericGamma => "NumericGamma",
        }
    }
}

impl fmt::Display for SteppedMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SteppedMeasure {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        SteppedMeasure::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| PricingError::invalid_input(format!("unknown stepped measure: {}", s)))
    }
}
