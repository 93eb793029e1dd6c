//! Option Pricer CLI - Command Line Operations for the Batch Option Pricer
//!
//! # Commands
//!
//! - `option-pricer price` - Evaluate one measure on a single record
//! - `option-pricer parity` - Put-call parity price and arbitrage check
//! - `option-pricer sweep` - Evaluate a measure across a parameter grid
//! - `option-pricer batch` - Price a CSV file of records
//! - `option-pricer demo` - Scripted tour over the sample files
//!
//! # Configuration
//!
//! Defaults are read from `pricer.toml` (or `--config`) and `PRICER_*`
//! environment variables; `RUST_LOG` overrides the log filter.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pricer_models::instruments::OptionParameter;
use pricer_risk::BatchMode;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::batch::OutputFormat;
use commands::sweep::SweepSpec;
use commands::{Family, OptionArgs, Selection};
use config::PricerConfig;

/// Batch option pricer with analytical and numerical sensitivities
#[derive(Parser)]
#[command(name = "option-pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to ./pricer.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one measure on a single record
    Price {
        /// Option family
        #[arg(long, value_enum, default_value = "european")]
        family: Family,

        #[command(flatten)]
        option: OptionArgs,

        /// Measure name (Price, Delta, ..., NumericDelta, NumericGamma)
        #[arg(short, long, default_value = "Price")]
        measure: Selection,

        /// Finite-difference step for numeric measures
        #[arg(long)]
        shock: Option<f64>,

        /// Also evaluate the opposite kind
        #[arg(long)]
        both: bool,
    },

    /// Put-call parity price of a European record
    Parity {
        #[command(flatten)]
        option: OptionArgs,

        /// Observed opposite-kind price to check for arbitrage
        #[arg(long)]
        observed: Option<f64>,

        /// Absolute tolerance for the arbitrage check
        #[arg(long)]
        tolerance: Option<f64>,
    },

    /// Evaluate a measure across a stepped grid of one parameter
    Sweep {
        /// Option family
        #[arg(long, value_enum, default_value = "european")]
        family: Family,

        #[command(flatten)]
        option: OptionArgs,

        /// Swept parameter (T, K, S, r, sigma, b)
        #[arg(short, long)]
        parameter: OptionParameter,

        /// First grid value
        #[arg(long)]
        start: f64,

        /// Upper grid bound, inclusive
        #[arg(long)]
        end: f64,

        /// Grid step
        #[arg(long)]
        step: f64,

        /// Measure name
        #[arg(short, long, default_value = "Price")]
        measure: Selection,

        /// Finite-difference step for numeric measures
        #[arg(long)]
        shock: Option<f64>,

        /// Evaluate points in parallel
        #[arg(long)]
        parallel: bool,

        /// Write the table as CSV under the output directory
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Price a CSV file of records
    Batch {
        /// Option family of the file
        #[arg(long, value_enum, default_value = "european")]
        family: Family,

        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output mode (price, basic, all)
        #[arg(short, long, default_value = "price")]
        mode: BatchMode,

        /// Finite-difference step for numeric columns
        #[arg(long)]
        shock: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Output file name under the output directory
        #[arg(short, long)]
        output: Option<String>,

        /// Evaluate records in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Scripted tour over the sample record files
    Demo {
        /// Directory holding european_batch.csv and american_batch.csv
        #[arg(long, default_value = "demo/data/input")]
        data_dir: PathBuf,
    },
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = PricerConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_filter_str()
    };
    init_tracing(level);
    info!(output_dir = %config.output_dir.display(), "Option pricer starting");
    debug!(?config, "Effective configuration");

    let result = execute(cli.command, &config);
    if let Err(err) = &result {
        let configuration = err
            .downcast_ref::<CliError>()
            .is_some_and(CliError::is_configuration);
        error!(configuration, "{err:#}");
    }
    result
}

fn execute(command: Commands, config: &PricerConfig) -> anyhow::Result<()> {
    match command {
        Commands::Price {
            family,
            option,
            measure,
            shock,
            both,
        } => commands::price::run(family, &option, measure, shock.unwrap_or(config.shock_size), both)?,
        Commands::Parity {
            option,
            observed,
            tolerance,
        } => commands::parity::run(&option, observed, tolerance.unwrap_or(config.parity_tolerance))?,
        Commands::Sweep {
            family,
            option,
            parameter,
            start,
            end,
            step,
            measure,
            shock,
            parallel,
            output,
        } => {
            let spec = SweepSpec {
                parameter,
                start,
                end,
                step,
                measure,
                shock: shock.unwrap_or(config.shock_size),
                parallel,
            };
            commands::sweep::run(config, family, &option, &spec, output.as_deref())?
        }
        Commands::Batch {
            family,
            input,
            mode,
            shock,
            format,
            output,
            parallel,
        } => commands::batch::run(
            config,
            family,
            &input,
            mode,
            shock.unwrap_or(config.shock_size),
            format,
            output.as_deref(),
            parallel,
        )
        .with_context(|| format!("Batch over {} failed", input.display()))?,
        Commands::Demo { data_dir } => commands::demo::run(config, &data_dir)?,
    }

    Ok(())
}
