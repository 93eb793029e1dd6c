//! Sweep command implementation
//!
//! Evaluates one measure across a stepped grid of one parameter.

use demo_outputs::prelude::*;
use pricer_models::instruments::{OptionParameter, OptionRecord};
use pricer_risk::{ParameterSweep, SweepTable};

use super::{Family, OptionArgs, Selection};
use crate::config::PricerConfig;
use crate::Result;

/// Grid and evaluation settings for a sweep
#[derive(Debug, Clone)]
pub struct SweepSpec {
    /// Swept parameter
    pub parameter: OptionParameter,
    /// First grid value
    pub start: f64,
    /// Upper grid bound, inclusive
    pub end: f64,
    /// Grid step
    pub step: f64,
    /// Measure evaluated at each point
    pub measure: Selection,
    /// Finite-difference step for stepped measures
    pub shock: f64,
    /// Evaluate points on the rayon pool
    pub parallel: bool,
}

/// Run the sweep command
pub fn run(
    config: &PricerConfig,
    family: Family,
    option: &OptionArgs,
    spec: &SweepSpec,
    output: Option<&str>,
) -> Result<()> {
    let table = match family {
        Family::European => sweep(option.european()?, spec, config.trace_sweeps)?,
        Family::American => sweep(option.american()?, spec, config.trace_sweeps)?,
    };

    println!("{} over {} ({} points)", table.measure, table.parameter, table.len());
    print!("{}", ConsolePrinter.render(&table));

    if let Some(name) = output {
        let path = FileWriter::new(&config.output_dir).write_csv(name, &table)?;
        println!("Written to {}", path.display());
    }
    Ok(())
}

/// Builds and evaluates a sweep over `base`.
pub fn sweep<R: OptionRecord>(base: R, spec: &SweepSpec, trace: bool) -> Result<SweepTable> {
    let sweep = ParameterSweep::stepped(base, spec.parameter, spec.start, spec.end, spec.step)?
        .with_trace(trace);
    let table = match (spec.measure, spec.parallel) {
        (Selection::Closed(m), false) => sweep.evaluate(m)?,
        (Selection::Closed(m), true) => sweep.evaluate_par(m)?,
        (Selection::Stepped(m), false) => sweep.evaluate_stepped(m, spec.shock)?,
        (Selection::Stepped(m), true) => sweep.evaluate_stepped_par(m, spec.shock)?,
    };
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use pricer_core::types::PricingError;
    use pricer_models::instruments::{AmericanPerpetualOption, OptionKind};
    use pricer_models::measures::Measure;
    use pricer_risk::RiskError;

    fn spec(parameter: OptionParameter) -> SweepSpec {
        SweepSpec {
            parameter,
            start: 10.0,
            end: 200.0,
            step: 10.0,
            measure: Selection::Closed(Measure::Price),
            shock: 0.5,
            parallel: false,
        }
    }

    fn perpetual() -> AmericanPerpetualOption {
        AmericanPerpetualOption::new(OptionKind::Call, 100.0, 110.0, 0.1, 0.1).with_carry(0.02)
    }

    #[test]
    fn test_american_spot_sweep() {
        let table = sweep(perpetual(), &spec(OptionParameter::Spot), false).unwrap();
        assert_eq!(table.len(), 20);
        assert_eq!(table.values[0], 10.0);
        assert_eq!(table.values[19], 200.0);
    }

    #[test]
    fn test_american_expiry_sweep_fails() {
        let err = sweep(perpetual(), &spec(OptionParameter::Expiry), false).unwrap_err();
        assert!(matches!(
            err,
            CliError::Risk(RiskError::Pricing(PricingError::ParameterNotApplicable { .. }))
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut spec = spec(OptionParameter::Spot);
        spec.measure = Selection::Stepped(pricer_models::measures::SteppedMeasure::NumericDelta);
        let seq = sweep(perpetual(), &spec, false).unwrap();
        spec.parallel = true;
        let par = sweep(perpetual(), &spec, false).unwrap();
        assert_eq!(seq, par);
    }
}
