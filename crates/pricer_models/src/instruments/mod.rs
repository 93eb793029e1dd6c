//! Option record definitions.
//!
//! # Architecture
//!
//! Two concrete record types share the [`OptionRecord`] capability trait:
//! - [`EuropeanOption`]: finite expiry, full closed-form Greek catalogue
//! - [`AmericanPerpetualOption`]: no expiry, closed-form price only
//!
//! Engines are generic over the trait (static dispatch, no trait objects).
//! Inputs are addressed by [`OptionParameter`] and each [`OptionFamily`]
//! declares which parameters it carries.
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{
//!     AmericanPerpetualOption, EuropeanOption, OptionKind, OptionParameter, OptionRecord,
//! };
//!
//! let european = EuropeanOption::new(OptionKind::Call, 1.0, 100.0, 100.0, 0.05, 0.2);
//! let bumped = european.with_parameter(OptionParameter::Spot, 101.0).unwrap();
//! assert_eq!(bumped.spot(), 101.0);
//!
//! let perpetual = AmericanPerpetualOption::new(OptionKind::Put, 100.0, 110.0, 0.1, 0.1);
//! assert!(perpetual.parameter(OptionParameter::Expiry).is_err());
//! ```

mod european;
mod kind;
mod parameter;
mod perpetual;
mod record;

pub use european::EuropeanOption;
pub use kind::OptionKind;
pub use parameter::{OptionFamily, OptionParameter};
pub use perpetual::AmericanPerpetualOption;
pub use record::OptionRecord;
