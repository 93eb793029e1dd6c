//! Demo command: a scripted tour of the pricer.
//!
//! Walks through single-record pricing, put-call parity, parameter sweeps,
//! batch tables and the perpetual American family, writing CSV results to
//! the configured output directory.
//!
//! # Expected Output Files
//!
//! ```text
//! outputs/european_spot_sweep.csv
//! outputs/european_batch_price.csv
//! outputs/european_batch_all.csv
//! outputs/american_batch_all.csv
//! ```

use std::path::Path;

use demo_inputs::prelude::*;
use demo_outputs::prelude::*;
use pricer_core::traits::Priceable;
use pricer_models::instruments::{
    AmericanPerpetualOption, EuropeanOption, OptionKind, OptionParameter, OptionRecord,
};
use pricer_models::measures::{Measure, SteppedMeasure};
use pricer_risk::{BatchMode, BatchPricer, ParameterSweep};
use tracing::error;

use super::{describe, parity};
use crate::config::PricerConfig;
use crate::Result;

/// Runs the demonstration against the sample files in `data_dir`.
pub fn run(config: &PricerConfig, data_dir: &Path) -> Result<()> {
    let sink = FileWriter::new(&config.output_dir);
    let trace = config.trace_sweeps;

    banner("European prices");
    let hull = EuropeanOption::new(OptionKind::Call, 0.25, 65.0, 60.0, 0.08, 0.3).with_id(1);
    let options = [
        hull,
        EuropeanOption::new(OptionKind::Call, 1.0, 100.0, 100.0, 0.0, 0.2).with_id(2),
        EuropeanOption::new(OptionKind::Call, 1.0, 10.0, 5.0, 0.12, 0.5).with_id(3),
        EuropeanOption::new(OptionKind::Call, 30.0, 100.0, 100.0, 0.08, 0.3).with_id(4),
    ];
    for option in &options {
        let put = option.with_kind(OptionKind::Put);
        println!("{}, Price: {}", describe(option), option.price()?);
        println!("{}, Price: {}", describe(&put), put.price()?);
    }

    banner("Put-call parity");
    for option in &options {
        parity::report(&option.with_kind(OptionKind::Put), None, config.parity_tolerance)?;
    }
    let hull_put = hull.with_kind(OptionKind::Put);
    parity::report(&hull_put, Some(2.1534), config.parity_tolerance)?;
    parity::report(&hull_put, Some(2.5534), config.parity_tolerance)?;

    banner("Spot sweep of option 1");
    let table = ParameterSweep::stepped(hull_put, OptionParameter::Spot, 10.0, 200.0, 5.0)?
        .with_trace(trace)
        .evaluate(Measure::Price)?;
    sink.write_csv("european_spot_sweep", &table)?;

    banner("European batch (price)");
    let european = load_european(data_dir.join("european_batch.csv"))?;
    let priced = BatchPricer::new(european.clone(), BatchMode::Price)?.evaluate(None)?;
    sink.write_csv("european_batch_price", &priced)?;
    println!("{}", priced.summary());

    banner("Futures option sensitivities");
    let futures = EuropeanOption::new(OptionKind::Call, 0.5, 100.0, 105.0, 0.1, 0.36)
        .with_carry(0.0)
        .with_id(5);
    for option in [futures, futures.with_kind(OptionKind::Put)] {
        println!(
            "{}, Delta: {}, Gamma: {}",
            describe(&option),
            option.evaluate(Measure::Delta)?,
            option.evaluate(Measure::Gamma)?
        );
    }

    banner("Delta sweep of option 5");
    let table = ParameterSweep::stepped(futures, OptionParameter::Spot, 10.0, 200.0, 5.0)?
        .with_trace(trace)
        .evaluate(Measure::Delta)?;
    print!("{}", ConsolePrinter.render(&table));

    banner("European batch (all)");
    let all = BatchPricer::new(european, BatchMode::All)?.evaluate(None)?;
    sink.write_csv("european_batch_all", &all)?;
    println!("{}", all.summary());

    let coarse = ParameterSweep::stepped(futures, OptionParameter::Spot, 20.0, 200.0, 20.0)?
        .with_trace(trace);
    for h in [20.0, 5.0, 0.001] {
        banner(&format!("Numeric delta with a shock size of {h}"));
        let table = coarse.evaluate_stepped(SteppedMeasure::NumericDelta, h)?;
        print!("{}", ConsolePrinter.render(&table));
    }
    banner("Delta using its analytical formula");
    print!("{}", ConsolePrinter.render(&coarse.evaluate(Measure::Delta)?));

    banner("Perpetual American prices");
    let perpetual = AmericanPerpetualOption::new(OptionKind::Call, 100.0, 110.0, 0.1, 0.1)
        .with_carry(0.02)
        .with_id(6);
    for option in [perpetual, perpetual.with_kind(OptionKind::Put)] {
        println!(
            "{}, Price: {}, Exercise boundary: {}",
            describe(&option),
            option.price()?,
            option.exercise_boundary()?
        );
    }

    banner("Spot sweep of option 6");
    let table = ParameterSweep::stepped(perpetual, OptionParameter::Spot, 10.0, 200.0, 10.0)?
        .with_trace(trace)
        .evaluate(Measure::Price)?;
    print!("{}", ConsolePrinter.render(&table));

    banner("Expiry sweep of option 6");
    match ParameterSweep::stepped(perpetual, OptionParameter::Expiry, 10.0, 200.0, 10.0) {
        Ok(sweep) => {
            sweep.evaluate(Measure::Price)?;
        }
        Err(err) => {
            error!(%err, "Expiry sweep rejected");
            println!("Error: {err}");
        }
    }

    banner("American batch (all)");
    let american = load_american(data_dir.join("american_batch.csv"))?;
    let all = BatchPricer::new(american, BatchMode::All)?.evaluate(Some(config.shock_size))?;
    sink.write_csv("american_batch_all", &all)?;
    println!("{}", all.summary());

    banner("Written files");
    for file in sink.written_files() {
        println!("{} ({} rows, {})", file.path.display(), file.rows, file.written_at);
    }
    Ok(())
}

fn banner(title: &str) {
    println!();
    println!("========================================");
    println!("{title}");
    println!("========================================");
}
