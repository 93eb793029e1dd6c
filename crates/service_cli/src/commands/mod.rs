//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Shared argument groups
//! and the measure selector live here.

pub mod batch;
pub mod demo;
pub mod parity;
pub mod price;
pub mod sweep;

use std::str::FromStr;

use clap::{Args, ValueEnum};
use pricer_core::types::PricingError;
use pricer_models::instruments::{AmericanPerpetualOption, EuropeanOption, OptionKind, OptionRecord};
use pricer_models::measures::{Measure, SteppedMeasure};

use crate::{CliError, Result};

/// Option family selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Family {
    /// Generalized Black-Scholes European option
    European,
    /// Perpetual American option
    American,
}

/// Contract and market inputs for a single record
#[derive(Debug, Clone, Args)]
pub struct OptionArgs {
    /// Record id
    #[arg(long, default_value_t = 1)]
    pub id: u64,

    /// Option type (call or put)
    #[arg(long, default_value = "call")]
    pub kind: OptionKind,

    /// Time to expiry in years (European only)
    #[arg(short = 'T', long)]
    pub expiry: Option<f64>,

    /// Strike
    #[arg(short = 'K', long)]
    pub strike: f64,

    /// Spot
    #[arg(short = 'S', long)]
    pub spot: f64,

    /// Risk-free rate
    #[arg(short = 'r', long)]
    pub rate: f64,

    /// Volatility
    #[arg(short = 'v', long)]
    pub volatility: f64,

    /// Cost of carry (defaults to the rate)
    #[arg(short = 'b', long)]
    pub carry: Option<f64>,
}

impl OptionArgs {
    /// Builds a European record; the expiry is required.
    pub fn european(&self) -> Result<EuropeanOption> {
        let expiry = self
            .expiry
            .ok_or_else(|| CliError::InvalidArgument("European options need --expiry".into()))?;
        Ok(
            EuropeanOption::new(self.kind, expiry, self.strike, self.spot, self.rate, self.volatility)
                .with_carry(self.carry.unwrap_or(self.rate))
                .with_id(self.id),
        )
    }

    /// Builds a perpetual American record; an expiry is rejected.
    pub fn american(&self) -> Result<AmericanPerpetualOption> {
        if self.expiry.is_some() {
            return Err(
                PricingError::parameter_not_applicable("T", AmericanPerpetualOption::FAMILY.name()).into(),
            );
        }
        Ok(
            AmericanPerpetualOption::new(self.kind, self.strike, self.spot, self.rate, self.volatility)
                .with_carry(self.carry.unwrap_or(self.rate))
                .with_id(self.id),
        )
    }
}

/// A closed-form measure or a finite-difference measure, parsed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Closed(Measure),
    Stepped(SteppedMeasure),
}

impl FromStr for Selection {
    type Err = PricingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse::<Measure>()
            .map(Selection::Closed)
            .or_else(|_| s.parse::<SteppedMeasure>().map(Selection::Stepped))
            .map_err(|_| PricingError::invalid_input(format!("Unknown measure: {s}")))
    }
}

impl Selection {
    /// Header name of the selected measure.
    pub fn name(self) -> &'static str {
        match self {
            Selection::Closed(m) => m.name(),
            Selection::Stepped(m) => m.name(),
        }
    }

    /// Evaluates the selection on one record.
    pub fn evaluate<R: OptionRecord>(self, record: &R, shock: f64) -> Result<f64> {
        let value = match self {
            Selection::Closed(m) => record.evaluate(m)?,
            Selection::Stepped(m) => record.evaluate_stepped(m, shock)?,
        };
        Ok(value)
    }
}

/// One-line description of a record: `Option 1 Call T=0.25 K=65 ...`.
pub fn describe<R: OptionRecord>(record: &R) -> String {
    let row = record.identity_row();
    let header = R::FAMILY.identity_header();
    let params: Vec<String> = header
        .iter()
        .zip(&row)
        .skip(2)
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    format!("Option {} {} {}", record.id(), record.kind(), params.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> OptionArgs {
        OptionArgs {
            id: 5,
            kind: OptionKind::Put,
            expiry: Some(0.5),
            strike: 100.0,
            spot: 105.0,
            rate: 0.1,
            volatility: 0.36,
            carry: Some(0.0),
        }
    }

    #[test]
    fn test_european_from_args() {
        let option = args().european().unwrap();
        assert_eq!(option.id(), 5);
        assert_eq!(option.carry(), 0.0);
        assert_eq!(option.expiry(), 0.5);
    }

    #[test]
    fn test_european_needs_expiry() {
        let args = OptionArgs { expiry: None, ..args() };
        assert!(matches!(args.european(), Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_american_rejects_expiry() {
        assert!(matches!(
            args().american(),
            Err(CliError::Pricing(PricingError::ParameterNotApplicable { .. }))
        ));
        let args = OptionArgs { expiry: None, carry: None, ..args() };
        assert_eq!(args.american().unwrap().carry(), 0.1);
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!("delta".parse::<Selection>().unwrap(), Selection::Closed(Measure::Delta));
        assert_eq!(
            "NumericGamma".parse::<Selection>().unwrap(),
            Selection::Stepped(SteppedMeasure::NumericGamma)
        );
        assert!("Epsilon".parse::<Selection>().is_err());
    }

    #[test]
    fn test_describe() {
        let text = describe(&args().european().unwrap());
        assert_eq!(text, "Option 5 Put T=0.5 K=100 S=105 r=0.1 sigma=0.36 b=0");
    }
}
