//! # Pricer Risk (L4: Application)
//!
//! Sweep and batch engines driving option records uniformly.
//!
//! This crate provides:
//! - [`sweep::ParameterSweep`]: one measure across values of one parameter
//! - [`batch::BatchPricer`]: a fixed set of measure columns per record
//! - [`table::Tabular`]: text rendering shared by both result tables
//! - Rayon-based order-preserving parallel evaluation
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  sweep/     - ParameterSweep, table    │
//! │  batch/     - BatchPricer, modes       │
//! │  parallel/  - Rayon utilities          │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_models (L2)           │
//! │  OptionRecord, Measure, closed forms   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_models::instruments::{AmericanPerpetualOption, OptionKind, OptionParameter};
//! use pricer_models::measures::Measure;
//! use pricer_risk::sweep::ParameterSweep;
//! use pricer_risk::RiskError;
//!
//! let perpetual = AmericanPerpetualOption::new(OptionKind::Call, 100.0, 110.0, 0.1, 0.1)
//!     .with_carry(0.02);
//!
//! let prices = ParameterSweep::stepped(perpetual, OptionParameter::Spot, 10.0, 200.0, 10.0)
//!     .unwrap()
//!     .evaluate(Measure::Price)
//!     .unwrap();
//! assert_eq!(prices.len(), 20);
//!
//! // Perpetual options carry no expiry
//! let err = ParameterSweep::stepped(perpetual, OptionParameter::Expiry, 10.0, 200.0, 10.0);
//! assert!(matches!(err, Err(RiskError::Pricing(_))));
//! ```

#![warn(missing_docs)]

pub mod batch;
pub mod error;
pub mod parallel;
pub mod sweep;
pub mod table;

pub use batch::{BatchColumn, BatchMode, BatchPricer, BatchRow, BatchSummary, BatchTable};
pub use error::RiskError;
pub use sweep::{ParameterSweep, SweepTable};
pub use table::Tabular;
