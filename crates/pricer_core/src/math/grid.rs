//! Parameter grids for one-dimensional sweeps.
//!
//! A stepped grid `(start, end, step)` expands to
//! `start, start + step, start + 2·step, …` and stops at `end`. The point
//! count is `floor((end - start) / step) + 1`. Points are computed as
//! `start + i·step` rather than by repeated addition, so rounding does not
//! accumulate along the grid, and no point is ever emitted past `end`.

use crate::types::{PricingError, PricingResult};

/// Upper bound on grid size, guarding against a step that is tiny relative to the span.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Rounding allowance, in ULPs, applied to `(end - start) / step` before
/// flooring, so that spans which are an exact multiple of `step` in decimal
/// keep their last point.
const COUNT_SLACK_ULPS: f64 = 4.0;

/// Number of points in the stepped grid `(start, end, step)`.
///
/// # Errors
/// - `PricingError::InvalidInput` if any bound is not finite, `step <= 0`,
///   `end < start`, or the grid would exceed [`MAX_GRID_POINTS`].
///
/// # Examples
/// ```
/// use pricer_core::math::grid::grid_len;
///
/// assert_eq!(grid_len(10.0, 200.0, 5.0).unwrap(), 39);
/// assert_eq!(grid_len(0.0, 1.0, 0.1).unwrap(), 11);
/// assert_eq!(grid_len(0.0, 0.95, 0.1).unwrap(), 10);
/// ```
pub fn grid_len(start: f64, end: f64, step: f64) -> PricingResult<usize> {
    if !start.is_finite() || !end.is_finite() || !step.is_finite() {
        return Err(PricingError::invalid_input(format!(
            "grid bounds must be finite: start = {}, end = {}, step = {}",
            start, end, step
        )));
    }
    if step <= 0.0 {
        return Err(PricingError::invalid_input(format!(
            "grid step must be positive: step = {}",
            step
        )));
    }
    if end < start {
        return Err(PricingError::invalid_input(format!(
            "grid end {} is below start {}",
            end, start
        )));
    }

    let span = (end - start) / step;
    // rounding of the bounds themselves, measured in steps
    let magnitude = span.max(1.0) + start.abs().max(end.abs()) / step;
    let intervals = (span + COUNT_SLACK_ULPS * f64::EPSILON * magnitude).floor();
    if intervals >= MAX_GRID_POINTS as f64 {
        return Err(PricingError::invalid_input(format!(
            "grid of {} points exceeds the limit of {}",
            intervals, MAX_GRID_POINTS
        )));
    }

    Ok(intervals as usize + 1)
}

/// Expands `(start, end, step)` into an ordered grid.
///
/// # Arguments
/// * `start` - First point
/// * `end` - Inclusive upper bound (only emitted if it lands on the grid)
/// * `step` - Spacing between points (must be positive)
///
/// # Errors
/// Same conditions as [`grid_len`].
///
/// # Examples
/// ```
/// use pricer_core::math::grid::stepped_grid;
///
/// let grid = stepped_grid(20.0, 200.0, 20.0).unwrap();
/// assert_eq!(grid.first(), Some(&20.0));
/// assert_eq!(grid.last(), Some(&200.0));
///
/// // 95 is past the last reachable point, so the grid stops at 90
/// let grid = stepped_grid(10.0, 95.0, 10.0).unwrap();
/// assert_eq!(grid.last(), Some(&90.0));
/// ```
pub fn stepped_grid(start: f64, end: f64, step: f64) -> PricingResult<Vec<f64>> {
    let len = grid_len(start, end, step)?;
    Ok((0..len)
        .map(|i| (start + i as f64 * step).min(end))
        .collect())
}
