//! Price command implementation
//!
//! Evaluates one measure on a single record, optionally for the opposite
//! kind as well.

use pricer_models::instruments::OptionRecord;
use tracing::info;

use super::{describe, Family, OptionArgs, Selection};
use crate::Result;

/// Run the price command
pub fn run(family: Family, option: &OptionArgs, measure: Selection, shock: f64, both: bool) -> Result<()> {
    info!(?family, measure = measure.name(), "Pricing single record");
    match family {
        Family::European => {
            let record = option.european()?;
            let flipped = record.with_kind(record.kind().opposite());
            report(&records(record, flipped, both), measure, shock)
        }
        Family::American => {
            let record = option.american()?;
            let flipped = record.with_kind(record.kind().opposite());
            report(&records(record, flipped, both), measure, shock)
        }
    }
}

fn records<R>(record: R, flipped: R, both: bool) -> Vec<R> {
    if both {
        vec![record, flipped]
    } else {
        vec![record]
    }
}

fn report<R: OptionRecord>(records: &[R], measure: Selection, shock: f64) -> Result<()> {
    for record in records {
        let value = measure.evaluate(record, shock)?;
        println!("{}, {}: {}", describe(record), measure.name(), value);
    }
    Ok(())
}
