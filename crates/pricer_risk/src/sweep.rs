//! One-dimensional parameter sweeps.
//!
//! A [`ParameterSweep`] varies exactly one named input of a base record over
//! an ordered list of values and evaluates one measure at each point. Every
//! point is an overridden copy of the base record, so points are independent
//! and the parallel path returns exactly what the sequential path does.
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{EuropeanOption, OptionKind, OptionParameter};
//! use pricer_models::measures::Measure;
//! use pricer_risk::sweep::ParameterSweep;
//!
//! let call = EuropeanOption::new(OptionKind::Call, 0.25, 65.0, 60.0, 0.08, 0.3);
//! let sweep = ParameterSweep::stepped(call, OptionParameter::Spot, 10.0, 200.0, 5.0).unwrap();
//!
//! let table = sweep.evaluate(Measure::Price).unwrap();
//! assert_eq!(table.values.len(), 39);
//! assert_eq!(table.results.len(), 39);
//! ```

use pricer_core::math::grid::stepped_grid;
use pricer_core::types::PricingResult;
use pricer_models::instruments::{OptionParameter, OptionRecord};
use pricer_models::measures::{Measure, SteppedMeasure};
use tracing::{debug, info};

use crate::error::RiskError;
use crate::parallel::parallel_map;
use crate::table::{render_values, Tabular};

/// Sweep of one parameter of a base record.
#[derive(Debug, Clone)]
pub struct ParameterSweep<R: OptionRecord> {
    base: R,
    parameter: OptionParameter,
    values: Vec<f64>,
    trace: bool,
}

impl<R: OptionRecord> ParameterSweep<R> {
    /// Creates a sweep over an explicit ordered list of values.
    ///
    /// # Errors
    /// `RiskError::Pricing(ParameterNotApplicable)` if the record family
    /// does not carry `parameter` (e.g. `T` on a perpetual American option).
    pub fn new(base: R, parameter: OptionParameter, values: Vec<f64>) -> Result<Self, RiskError> {
        R::FAMILY.ensure_supports(parameter)?;
        Ok(Self {
            base,
            parameter,
            values,
            trace: false,
        })
    }

    /// Creates a sweep over the grid `start, start + step, … ≤ end`.
    ///
    /// # Errors
    /// - `RiskError::Pricing(ParameterNotApplicable)` as for [`new`](Self::new)
    /// - `RiskError::Pricing(InvalidInput)` for an invalid grid
    pub fn stepped(
        base: R,
        parameter: OptionParameter,
        start: f64,
        end: f64,
        step: f64,
    ) -> Result<Self, RiskError> {
        R::FAMILY.ensure_supports(parameter)?;
        let values = stepped_grid(start, end, step)?;
        Self::new(base, parameter, values)
    }

    /// Enables the `value -> result` trace, emitted as `info` events.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Swept parameter.
    pub fn parameter(&self) -> OptionParameter {
        self.parameter
    }

    /// Parameter values in sweep order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Base record.
    pub fn base(&self) -> &R {
        &self.base
    }

    /// Evaluates a closed-form measure at every point.
    ///
    /// # Errors
    /// `RiskError::PointFailed` for the first failing point; no partial
    /// output is returned.
    pub fn evaluate(&self, measure: Measure) -> Result<SweepTable, RiskError> {
        self.run(measure.name(), false, |r| r.evaluate(measure))
    }

    /// Evaluates a finite-difference measure with shock size `h` at every point.
    ///
    /// # Errors
    /// Same as [`evaluate`](Self::evaluate).
    pub fn evaluate_stepped(&self, measure: SteppedMeasure, h: f64) -> Result<SweepTable, RiskError> {
        self.run(measure.name(), false, |r| r.evaluate_stepped(measure, h))
    }

    /// Parallel [`evaluate`](Self::evaluate); output is identical.
    pub fn evaluate_par(&self, measure: Measure) -> Result<SweepTable, RiskError> {
        self.run(measure.name(), true, |r| r.evaluate(measure))
    }

    /// Parallel [`evaluate_stepped`](Self::evaluate_stepped); output is identical.
    pub fn evaluate_stepped_par(
        &self,
        measure: SteppedMeasure,
        h: f64,
    ) -> Result<SweepTable, RiskError> {
        self.run(measure.name(), true, |r| r.evaluate_stepped(measure, h))
    }

    fn point(&self, value: f64) -> PricingResult<R> {
        self.base.with_parameter(self.parameter, value)
    }

    fn run<F>(&self, label: &str, parallel: bool, f: F) -> Result<SweepTable, RiskError>
    where
        F: Fn(&R) -> PricingResult<f64> + Sync + Send,
    {
        info!(
            parameter = %self.parameter,
            measure = label,
            points = self.values.len(),
            parallel,
            "Sweep started"
        );

        let eval = |value: &f64| self.point(*value).and_then(|r| f(&r));
        let outcomes: Vec<PricingResult<f64>> = if parallel {
            parallel_map(&self.values, eval)
        } else {
            self.values.iter().map(eval).collect()
        };

        let mut results = Vec::with_capacity(outcomes.len());
        for (value, outcome) in self.values.iter().zip(outcomes) {
            let result = outcome.map_err(|source| RiskError::PointFailed {
                parameter: self.parameter.symbol().to_string(),
                value: *value,
                source,
            })?;
            debug!(parameter = %self.parameter, value, result, "Sweep point evaluated");
            results.push(result);
        }

        let table = SweepTable {
            parameter: self.parameter,
            measure: label.to_string(),
            values: self.values.clone(),
            results,
        };

        if self.trace {
            for line in table.trace_lines() {
                info!("{}", line);
            }
        }
        info!(parameter = %self.parameter, measure = label, points = table.len(), "Sweep completed");

        Ok(table)
    }
}

/// Result of a sweep: parameter values and the matching results.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SweepTable {
    /// Swept parameter
    pub parameter: OptionParameter,
    /// Name of the evaluated measure
    pub measure: String,
    /// Parameter values in sweep order
    pub values: Vec<f64>,
    /// Results, `results[i]` evaluated at `values[i]`
    pub results: Vec<f64>,
}

impl SweepTable {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the sweep has no points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `value -> result` lines in sweep order.
    pub fn trace_lines(&self) -> Vec<String> {
        self.values
            .iter()
            .zip(&self.results)
            .map(|(v, r)| format!("{} -> {}", v, r))
            .collect()
    }
}

impl Tabular for SweepTable {
    fn header(&self) -> Option<Vec<String>> {
        None
    }

    /// Two rows: parameter values, then results; one column per point.
    fn rows(&self) -> Vec<Vec<String>> {
        vec![render_values(&self.values), render_values(&self.results)]
    }
}
