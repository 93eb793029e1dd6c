//! CSV record loaders.
//!
//! Rows are deserialised by position through serde, so header spelling does
//! not matter. Domain checks (positive volatility and so on) are left to
//! evaluation; only the option type is checked here.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use pricer_models::instruments::{AmericanPerpetualOption, EuropeanOption, OptionKind};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::info;

use crate::error::LoadError;

/// One row of a European record file: `id,type,T,K,S,r,sigma,b`.
#[derive(Debug, Clone, Deserialize)]
struct EuropeanRow {
    id: u64,
    kind: String,
    expiry: f64,
    strike: f64,
    spot: f64,
    rate: f64,
    volatility: f64,
    carry: Option<f64>,
}

/// One row of an American record file: `id,type,K,S,r,sigma,b`.
#[derive(Debug, Clone, Deserialize)]
struct AmericanRow {
    id: u64,
    kind: String,
    strike: f64,
    spot: f64,
    rate: f64,
    volatility: f64,
    carry: Option<f64>,
}

fn parse_kind(kind: &str, record: &StringRecord) -> Result<OptionKind, LoadError> {
    kind.parse().map_err(|source| LoadError::Record {
        line: record.position().map_or(0, |p| p.line()),
        source,
    })
}

fn read_rows<T, R, F, O>(reader: R, build: F) -> Result<Vec<O>, LoadError>
where
    T: DeserializeOwned,
    R: Read,
    F: Fn(T, &StringRecord) -> Result<O, LoadError>,
{
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(false)
        .from_reader(reader);

    let mut out = Vec::new();
    for record in csv.records() {
        let record = record?;
        let row: T = record.deserialize(None)?;
        out.push(build(row, &record)?);
    }
    Ok(out)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads European records from any reader.
///
/// # Examples
/// ```
/// use demo_inputs::file_source::load_european_from_reader;
///
/// let data = "id,type,T,K,S,r,sigma,b\n1,Call,0.25,65,60,0.08,0.3,\n";
/// let records = load_european_from_reader(data.as_bytes()).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].carry(), 0.08);
/// ```
pub fn load_european_from_reader<R: Read>(reader: R) -> Result<Vec<EuropeanOption>, LoadError> {
    read_rows(reader, |row: EuropeanRow, record| {
        let kind = parse_kind(&row.kind, record)?;
        Ok(
            EuropeanOption::new(kind, row.expiry, row.strike, row.spot, row.rate, row.volatility)
                .with_carry(row.carry.unwrap_or(row.rate))
                .with_id(row.id),
        )
    })
}

/// Loads perpetual American records from any reader.
pub fn load_american_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<AmericanPerpetualOption>, LoadError> {
    read_rows(reader, |row: AmericanRow, record| {
        let kind = parse_kind(&row.kind, record)?;
        Ok(
            AmericanPerpetualOption::new(kind, row.strike, row.spot, row.rate, row.volatility)
                .with_carry(row.carry.unwrap_or(row.rate))
                .with_id(row.id),
        )
    })
}

/// Loads European records from a file.
///
/// # Errors
/// - `LoadError::Io` if the file cannot be opened
/// - `LoadError::Csv` for malformed rows or non-numeric cells
/// - `LoadError::Record` for an unknown option type
pub fn load_european(path: impl AsRef<Path>) -> Result<Vec<EuropeanOption>, LoadError> {
    let path = path.as_ref();
    let records = load_european_from_reader(open(path)?)?;
    info!(path = %path.display(), records = records.len(), "European records loaded");
    Ok(records)
}

/// Loads perpetual American records from a file.
///
/// # Errors
/// Same as [`load_european`].
pub fn load_american(path: impl AsRef<Path>) -> Result<Vec<AmericanPerpetualOption>, LoadError> {
    let path = path.as_ref();
    let records = load_american_from_reader(open(path)?)?;
    info!(path = %path.display(), records = records.len(), "American records loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::PricingError;
    use pricer_models::instruments::{OptionParameter, OptionRecord};

    const EUROPEAN: &str = "\
id,type,T,K,S,r,sigma,b
1,Call,0.25,65,60,0.08,0.3,0.08
2, Put ,1.0,100,100,0.0,0.2,
3,call,0.5,100,105,0.1,0.36,0
";

    const AMERICAN: &str = "\
id,type,K,S,r,sigma,b
6,Call,100,110,0.1,0.1,0.02
7,Put,100,110,0.1,0.1,0.02
";

    #[test]
    fn test_european_rows() {
        let records = load_european_from_reader(EUROPEAN.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].id(), 1);
        assert_eq!(records[0].expiry(), 0.25);
        assert_eq!(records[1].kind(), OptionKind::Put);
        assert_eq!(records[1].carry(), 0.0);
        assert_eq!(records[2].kind(), OptionKind::Call);
        assert_eq!(records[2].parameter(OptionParameter::Carry).unwrap(), 0.0);
    }

    #[test]
    fn test_american_rows() {
        let records = load_american_from_reader(AMERICAN.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id(), 7);
        assert_eq!(records[1].carry(), 0.02);
    }

    #[test]
    fn test_empty_file_has_no_records() {
        let records = load_european_from_reader("id,type,T,K,S,r,sigma,b\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_unknown_type_reports_line() {
        let data = "id,type,T,K,S,r,sigma,b\n1,Call,1,100,100,0.05,0.2,0.05\n2,Straddle,1,100,100,0.05,0.2,0.05\n";
        match load_european_from_reader(data.as_bytes()) {
            Err(LoadError::Record { line, source }) => {
                assert_eq!(line, 3);
                assert!(matches!(source, PricingError::InvalidOptionKind(_)));
            }
            other => panic!("Expected Record error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_cell() {
        let data = "id,type,T,K,S,r,sigma,b\n1,Call,soon,100,100,0.05,0.2,0.05\n";
        assert!(matches!(
            load_european_from_reader(data.as_bytes()),
            Err(LoadError::Csv(_))
        ));
    }

    #[test]
    fn test_wrong_column_count() {
        // an American row fed to the European loader
        let data = "id,type,T,K,S,r,sigma,b\n6,Call,100,110,0.1,0.1,0.02\n";
        assert!(load_european_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_european("/nonexistent/records.csv"),
            Err(LoadError::Io { .. })
        ));
    }
}
