//! Checks the bundled sample record files load and price as expected.

use std::io::Write;
use std::path::PathBuf;

use approx::assert_relative_eq;
use demo_inputs::prelude::*;
use pricer_core::traits::Priceable;
use pricer_models::instruments::{OptionKind, OptionRecord};

fn sample(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../data/input")
        .join(name)
}

#[test]
fn test_european_sample_loads() {
    let records = load_european(sample("european_batch.csv")).unwrap();
    assert_eq!(records.len(), 10);

    let calls = records.iter().filter(|r| r.kind() == OptionKind::Call).count();
    assert_eq!(calls, 5);

    let first = &records[0];
    assert_relative_eq!(first.price().unwrap(), 2.1333684449162043, epsilon = 1e-10);

    let futures_call = records.iter().find(|r| r.carry() == 0.0 && r.rate() == 0.1).unwrap();
    assert_eq!(futures_call.expiry(), 0.5);
}

#[test]
fn test_american_sample_loads() {
    let records = load_american(sample("american_batch.csv")).unwrap();
    assert_eq!(records.len(), 5);

    assert_relative_eq!(records[0].price().unwrap(), 18.50349988304792, epsilon = 1e-8);
    assert_relative_eq!(records[1].price().unwrap(), 3.031060383304734, epsilon = 1e-8);

    // empty b cell falls back to r
    assert_eq!(records[4].carry(), records[4].rate());
}

#[test]
fn test_load_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "id,type,K,S,r,sigma,b").unwrap();
    writeln!(file, "42,put,100,110,0.1,0.1,0.02").unwrap();

    let records = load_american(file.path()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind(), OptionKind::Put);
}

#[test]
fn test_invalid_values_load_but_fail_to_price() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "id,type,T,K,S,r,sigma,b").unwrap();
    writeln!(file, "1,Call,1.0,100,100,0.05,-0.2,0.05").unwrap();

    let records = load_european(file.path()).unwrap();
    assert!(records[0].price().is_err());
}
