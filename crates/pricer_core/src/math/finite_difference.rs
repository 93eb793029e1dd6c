//! Central finite-difference approximations.
//!
//! Bump-and-revalue estimates of first and second derivatives:
//!
//! - First derivative: `f'(x) ≈ (f(x + h) - f(x - h)) / 2h`
//! - Second derivative: `f''(x) ≈ (f(x + h) - 2f(x) + f(x - h)) / h²`
//!
//! The step `h` is an error source. Truncation error grows as O(h²) and
//! rounding error grows as O(ε/h) (first derivative) or O(ε/h²) (second
//! derivative), so the best `h` sits between the two. Choosing it is the
//! caller's responsibility.
//!
//! Both estimators take a fallible `f` and stop at the first error, so a
//! bump that leaves the pricing domain surfaces as that error.

use num_traits::Float;

/// Central difference estimate of `f'(x)`.
///
/// # Arguments
/// * `f` - Function to differentiate
/// * `x` - Evaluation point
/// * `h` - Bump size (must be positive)
///
/// # Examples
/// ```
/// use pricer_core::math::finite_difference::try_central_first;
///
/// let d = try_central_first(|x: f64| Ok::<_, ()>(x.exp()), 0.0, 1e-4).unwrap();
/// assert!((d - 1.0).abs() < 1e-8);
/// ```
pub fn try_central_first<T, E, F>(f: F, x: T, h: T) -> Result<T, E>
where
    T: Float,
    F: Fn(T) -> Result<T, E>,
{
    let two = T::one() + T::one();
    let up = f(x + h)?;
    let down = f(x - h)?;
    Ok((up - down) / (two * h))
}

/// Central difference estimate of `f''(x)`.
///
/// # Examples
/// ```
/// use pricer_core::math::finite_difference::try_central_second;
///
/// let d2 = try_central_second(|x: f64| Ok::<_, ()>(x * x * x), 2.0, 1e-3).unwrap();
/// assert!((d2 - 12.0).abs() < 1e-5);
/// ```
pub fn try_central_second<T, E, F>(f: F, x: T, h: T) -> Result<T, E>
where
    T: Float,
    F: Fn(T) -> Result<T, E>,
{
    let two = T::one() + T::one();
    let up = f(x + h)?;
    let mid = f(x)?;
    let down = f(x - h)?;
    Ok((up - two * mid + down) / (h * h))
}
