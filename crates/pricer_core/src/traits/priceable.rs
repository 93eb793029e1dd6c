//! Trait for priceable instruments.
//!
//! The single capability every option family shares is a price. Each family
//! implements it with its own closed form; nothing else is inherited.

use num_traits::Float;

use crate::types::PricingError;

/// Trait for entities that can be priced.
///
/// # Type Parameters
/// * `T` - Floating-point type (f32 or f64)
///
/// # Design Philosophy
///
/// This trait is designed for **static dispatch**. Engines take the concrete
/// option type as a generic parameter instead of `Box<dyn Priceable>`.
///
/// ```
/// use pricer_core::traits::priceable::Priceable;
/// use pricer_core::types::PricingError;
///
/// struct Forward {
///     spot: f64,
///     strike: f64,
/// }
///
/// impl Priceable<f64> for Forward {
///     fn price(&self) -> Result<f64, PricingError> {
///         Ok(self.spot - self.strike)
///     }
/// }
///
/// let fwd = Forward { spot: 105.0, strike: 100.0 };
/// assert_eq!(fwd.price().unwrap(), 5.0);
/// ```
pub trait Priceable<T: Float> {
    /// Calculate the price of the instrument.
    ///
    /// # Returns
    /// The present value, or an error when the inputs leave the domain of
    /// the pricing formula.
    ///
    /// # Invariants
    /// - The method must be pure (no side effects, deterministic)
    fn price(&self) -> Result<T, PricingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    enum SimpleInstrument {
        FixedValue(f64),
        Broken,
    }

    impl Priceable<f64> for SimpleInstrument {
        fn price(&self) -> Result<f64, PricingError> {
            match self {
                SimpleInstrument::FixedValue(val) => Ok(*val),
                SimpleInstrument::Broken => Err(PricingError::invalid_input("broken")),
            }
        }
    }

    #[test]
    fn test_priceable_with_f64() {
        let instrument = SimpleInstrument::FixedValue(100.0);
        assert_eq!(instrument.price().unwrap(), 100.0);
    }

    #[test]
    fn test_priceable_propagates_error() {
        assert!(SimpleInstrument::Broken.price().is_err());
    }

    #[test]
    fn test_trait_method_has_no_side_effects() {
        let instrument = SimpleInstrument::FixedValue(100.0);
        assert_eq!(instrument.price().unwrap(), instrument.price().unwrap());
    }
}
