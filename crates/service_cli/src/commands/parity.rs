//! Parity command implementation
//!
//! Prints the opposite-kind price implied by put-call parity and, given an
//! observed price, checks it for an arbitrage signal.

use pricer_core::traits::Priceable;
use pricer_models::instruments::{EuropeanOption, OptionRecord};
use tracing::info;

use super::{describe, OptionArgs};
use crate::Result;

/// Run the parity command
pub fn run(option: &OptionArgs, observed: Option<f64>, tolerance: f64) -> Result<()> {
    let record = option.european()?;
    report(&record, observed, tolerance)
}

pub(crate) fn report(record: &EuropeanOption, observed: Option<f64>, tolerance: f64) -> Result<()> {
    let opposite = record.kind().opposite();
    println!(
        "{}, Price: {}, {} Price: {}",
        describe(record),
        record.price()?,
        opposite,
        record.price_put_call_parity()?
    );

    if let Some(observed) = observed {
        let check = record.check_put_call_parity(observed, tolerance)?;
        if check.arbitrage {
            println!(
                "Arbitrage: observed {} {} differs from parity {} by {} (tolerance {})",
                opposite, check.observed, check.implied, check.difference, check.tolerance
            );
        } else {
            info!(observed, tolerance, "Put-call parity holds");
            println!(
                "No arbitrage: observed {} {} within {} of parity {}",
                opposite, check.observed, check.tolerance, check.implied
            );
        }
    }
    Ok(())
}
