//! Rayon-based parallelisation utilities.
//!
//! Sweeps and batches promise output in input order. [`parallel_map`] uses an
//! indexed parallel iterator, whose `collect` preserves that order
//! regardless of which worker finishes first.

use rayon::prelude::*;

/// Minimum item count before the engines' `evaluate_par` paths fan out.
///
/// Below it a single closed-form evaluation is cheaper than the scheduling.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Parallel map preserving input order.
///
/// # Arguments
///
/// * `items` - Slice of items to process
/// * `mapper` - Function to apply to each item
///
/// # Returns
///
/// Vector of mapped results, `result[i] = mapper(&items[i])`.
pub fn parallel_map<T, R, F>(items: &[T], mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    if items.len() < DEFAULT_PARALLEL_THRESHOLD {
        return items.iter().map(mapper).collect();
    }
    items.par_iter().map(mapper).collect()
}
