//! Batch command implementation
//!
//! Loads a record file, evaluates the mode's columns for every record and
//! writes the table.

use std::path::Path;

use clap::ValueEnum;
use demo_inputs::prelude::*;
use demo_outputs::prelude::*;
use pricer_models::instruments::OptionRecord;
use pricer_risk::{BatchMode, BatchPricer, BatchTable, RiskError};
use tracing::warn;

use super::Family;
use crate::config::PricerConfig;
use crate::Result;

/// Output format for batch results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// CSV file under the output directory
    Csv,
    /// JSON file under the output directory
    Json,
    /// Aligned table on standard output
    Table,
}

/// Run the batch command
#[allow(clippy::too_many_arguments)]
pub fn run(
    config: &PricerConfig,
    family: Family,
    input: &Path,
    mode: BatchMode,
    shock: f64,
    format: OutputFormat,
    output: Option<&str>,
    parallel: bool,
) -> Result<()> {
    let default_name = format!("{}_batch_{}", family_name(family), mode);
    let name = output.unwrap_or(&default_name);
    let sink = FileWriter::new(&config.output_dir);

    let outcome = match family {
        Family::European => price(load_european(input)?, mode, shock, parallel),
        Family::American => price(load_american(input)?, mode, shock, parallel),
    };

    match outcome {
        Ok(table) => {
            emit(&sink, &table, name, format)?;
            println!("{}", table.summary());
            Ok(())
        }
        Err(err) => {
            // rows completed before the failing record are still written
            if let Some(partial) = err.partial() {
                warn!(rows = partial.rows.len(), "Writing partial batch output");
                emit(&sink, partial, name, format)?;
            }
            Err(err.into())
        }
    }
}

/// Evaluates a batch of records.
pub fn price<R: OptionRecord>(
    records: Vec<R>,
    mode: BatchMode,
    shock: f64,
    parallel: bool,
) -> std::result::Result<BatchTable, RiskError> {
    let pricer = BatchPricer::new(records, mode)?;
    if parallel {
        pricer.evaluate_par(Some(shock))
    } else {
        pricer.evaluate(Some(shock))
    }
}

/// Writes or prints `table` in `format`.
pub fn emit(sink: &FileWriter, table: &BatchTable, name: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            let path = sink.write_csv(name, table)?;
            println!("Written to {}", path.display());
        }
        OutputFormat::Json => {
            let path = sink.write_json(name, table)?;
            println!("Written to {}", path.display());
        }
        OutputFormat::Table => print!("{}", ConsolePrinter.render(table)),
    }
    Ok(())
}

fn family_name(family: Family) -> &'static str {
    match family {
        Family::European => "european",
        Family::American => "american",
    }
}
