//! Capability trait shared by option records.
//!
//! Engines are generic over [`OptionRecord`] and never mutate a record in
//! place: re-evaluating at another parameter value goes through
//! [`OptionRecord::with_parameter`], which returns an overridden copy. That
//! keeps each evaluation independent and lets sweeps and batches run on
//! worker threads.

use pricer_core::math::finite_difference::{try_central_first, try_central_second};
use pricer_core::traits::Priceable;
use pricer_core::types::{PricingError, PricingResult};

use super::kind::OptionKind;
use super::parameter::{OptionFamily, OptionParameter};
use crate::measures::{Measure, SteppedMeasure};

/// An option record that can be valued, bumped and tabulated.
///
/// # Required Methods
///
/// - [`id`](OptionRecord::id), [`kind`](OptionRecord::kind) - identity
/// - [`parameter`](OptionRecord::parameter) - read one named input
/// - [`with_parameter`](OptionRecord::with_parameter) - overridden copy
/// - [`evaluate`](OptionRecord::evaluate) - closed-form measure
///
/// # Provided Methods
///
/// - [`numeric_delta`](OptionRecord::numeric_delta) and
///   [`numeric_gamma`](OptionRecord::numeric_gamma) - central differences of
///   [`Priceable::price`] in the spot
/// - [`identity_row`](OptionRecord::identity_row) - leading batch columns
pub trait OptionRecord: Priceable<f64> + Clone + Send + Sync {
    /// Family of this record type.
    const FAMILY: OptionFamily;

    /// Traceability tag; not used by any formula.
    fn id(&self) -> u64;

    /// Call or put.
    fn kind(&self) -> OptionKind;

    /// Reads one named input.
    ///
    /// # Errors
    /// `PricingError::ParameterNotApplicable` if the family does not carry
    /// `parameter`.
    fn parameter(&self, parameter: OptionParameter) -> PricingResult<f64>;

    /// Returns a copy with one named input replaced.
    ///
    /// No domain validation happens here; an out-of-domain value surfaces
    /// when the copy is evaluated.
    ///
    /// # Errors
    /// `PricingError::ParameterNotApplicable` if the family does not carry
    /// `parameter`.
    fn with_parameter(&self, parameter: OptionParameter, value: f64) -> PricingResult<Self>;

    /// Evaluates a closed-form measure at the current inputs.
    ///
    /// # Errors
    /// - `PricingError::InvalidInput` if the inputs leave the formula's domain
    /// - `PricingError::UnsupportedMeasure` if the family has no closed form
    ///   for `measure`
    /// - `PricingError::NumericalInstability` if the result is undefined
    fn evaluate(&self, measure: Measure) -> PricingResult<f64>;

    /// Central-difference delta, `(V(S+h) - V(S-h)) / 2h`.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` if `h` is not a positive finite number
    /// or a bumped spot leaves the pricing domain.
    fn numeric_delta(&self, h: f64) -> PricingResult<f64> {
        ensure_shock(h)?;
        let spot = self.parameter(OptionParameter::Spot)?;
        try_central_first(
            |s| self.with_parameter(OptionParameter::Spot, s)?.price(),
            spot,
            h,
        )
    }

    /// Central-difference gamma, `(V(S+h) - 2V(S) + V(S-h)) / h²`.
    ///
    /// # Errors
    /// Same conditions as [`numeric_delta`](OptionRecord::numeric_delta).
    fn numeric_gamma(&self, h: f64) -> PricingResult<f64> {
        ensure_shock(h)?;
        let spot = self.parameter(OptionParameter::Spot)?;
        try_central_second(
            |s| self.with_parameter(OptionParameter::Spot, s)?.price(),
            spot,
            h,
        )
    }

    /// Evaluates a finite-difference measure with shock size `h`.
    fn evaluate_stepped(&self, measure: SteppedMeasure, h: f64) -> PricingResult<f64> {
        match measure {
            SteppedMeasure::NumericDelta => self.numeric_delta(h),
            SteppedMeasure::NumericGamma => self.numeric_gamma(h),
        }
    }

    /// Leading batch columns: id, kind, then the family's parameters.
    fn identity_row(&self) -> Vec<String> {
        let mut row = vec![self.id().to_string(), self.kind().to_string()];
        row.extend(
            Self::FAMILY
                .parameters()
                .iter()
                .filter_map(|p| self.parameter(*p).ok())
                .map(|v| v.to_string()),
        );
        row
    }
}

fn ensure_shock(h: f64) -> PricingResult<()> {
    if h > 0.0 && h.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid_input(format!(
            "shock size must be positive and finite: h = {}",
            h
        )))
    }
}
