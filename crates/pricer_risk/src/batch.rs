//! Batch tables over collections of option records.
//!
//! A [`BatchPricer`] applies one [`BatchMode`] to every record of a single
//! family and produces one row per record, in input order. Each row starts
//! with the record's identity columns (`Option, Type` and the family's
//! parameters) followed by the mode's measure columns.
//!
//! | Mode    | European                                   | AmericanPerpetual                      |
//! |---------|--------------------------------------------|----------------------------------------|
//! | `price` | `Price`                                    | `Price`                                |
//! | `basic` | `Price` … `Rho` (7 columns)                | unsupported                            |
//! | `all`   | full closed-form catalogue (17 columns)    | `Price, NumericDelta, NumericGamma`    |
//!
//! A failing record stops the batch. The rows computed before it are
//! returned inside [`RiskError::RecordFailed`] together with the record id.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::{PricingError, PricingResult};
use pricer_models::instruments::{OptionFamily, OptionKind, OptionRecord};
use pricer_models::measures::{Measure, SteppedMeasure};
use tracing::{debug, info, warn};

use crate::error::RiskError;
use crate::parallel::parallel_map;
use crate::table::{render_values, Tabular};

/// Output configuration of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BatchMode {
    /// Price only
    Price,
    /// Price, parity price and first-order Greeks (European only)
    Basic,
    /// Full catalogue of the family
    All,
}

impl BatchMode {
    /// Mode name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            BatchMode::Price => "price",
            BatchMode::Basic => "basic",
            BatchMode::All => "all",
        }
    }

    /// Measure columns of this mode for `family`.
    ///
    /// # Errors
    /// `PricingError::UnsupportedMeasure` for `basic` on the perpetual family.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::OptionFamily;
    /// use pricer_risk::batch::BatchMode;
    ///
    /// assert_eq!(BatchMode::All.columns(OptionFamily::European).unwrap().len(), 17);
    /// assert_eq!(BatchMode::All.columns(OptionFamily::AmericanPerpetual).unwrap().len(), 3);
    /// assert!(BatchMode::Basic.columns(OptionFamily::AmericanPerpetual).is_err());
    /// ```
    pub fn columns(self, family: OptionFamily) -> PricingResult<Vec<BatchColumn>> {
        match (self, family) {
            (BatchMode::Price, _) => Ok(vec![BatchColumn::Closed(Measure::Price)]),
            (BatchMode::Basic, OptionFamily::European) => {
                Ok(Measure::BASIC.into_iter().map(BatchColumn::Closed).collect())
            }
            (BatchMode::All, OptionFamily::European) => {
                Ok(Measure::ALL.into_iter().map(BatchColumn::Closed).collect())
            }
            (BatchMode::Basic, OptionFamily::AmericanPerpetual) => Err(
                PricingError::unsupported_measure("basic mode", family.name()),
            ),
            (BatchMode::All, OptionFamily::AmericanPerpetual) => {
                let mut columns = vec![BatchColumn::Closed(Measure::Price)];
                columns.extend(SteppedMeasure::ALL.into_iter().map(BatchColumn::Stepped));
                Ok(columns)
            }
        }
    }
}

impl fmt::Display for BatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BatchMode {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(BatchMode::Price),
            "basic" => Ok(BatchMode::Basic),
            "all" => Ok(BatchMode::All),
            _ => Err(PricingError::invalid_input(format!(
                "unknown batch mode '{}': expected price, basic or all",
                s
            ))),
        }
    }
}

/// One computed column of a batch row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchColumn {
    /// Closed-form measure
    Closed(Measure),
    /// Finite-difference measure using the batch shock size
    Stepped(SteppedMeasure),
}

impl BatchColumn {
    /// Column header.
    pub fn name(self) -> &'static str {
        match self {
            BatchColumn::Closed(m) => m.name(),
            BatchColumn::Stepped(m) => m.name(),
        }
    }

    fn is_stepped(self) -> bool {
        matches!(self, BatchColumn::Stepped(_))
    }
}

/// Evaluates a batch mode over records of one family.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{EuropeanOption, OptionKind};
/// use pricer_risk::batch::{BatchMode, BatchPricer};
///
/// let records = vec![
///     EuropeanOption::new(OptionKind::Call, 0.25, 65.0, 60.0, 0.08, 0.3).with_id(1),
///     EuropeanOption::new(OptionKind::Put, 1.0, 100.0, 100.0, 0.0, 0.2).with_id(2),
/// ];
/// let table = BatchPricer::new(records, BatchMode::Basic).unwrap().evaluate(None).unwrap();
/// assert_eq!(table.summary().ids, vec![1, 2]);
/// assert_eq!(table.header.last().map(String::as_str), Some("Rho"));
/// ```
#[derive(Debug, Clone)]
pub struct BatchPricer<R: OptionRecord> {
    records: Vec<R>,
    mode: BatchMode,
    columns: Vec<BatchColumn>,
}

impl<R: OptionRecord> BatchPricer<R> {
    /// Creates a batch pricer.
    ///
    /// # Errors
    /// `RiskError::Pricing(UnsupportedMeasure)` if the mode does not apply
    /// to the record family.
    pub fn new(records: Vec<R>, mode: BatchMode) -> Result<Self, RiskError> {
        let columns = mode.columns(R::FAMILY)?;
        Ok(Self {
            records,
            mode,
            columns,
        })
    }

    /// Batch mode.
    pub fn mode(&self) -> BatchMode {
        self.mode
    }

    /// Records in input order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Computed columns, after the identity columns.
    pub fn columns(&self) -> &[BatchColumn] {
        &self.columns
    }

    /// Full header: identity columns then computed columns.
    pub fn header(&self) -> Vec<String> {
        R::FAMILY
            .identity_header()
            .into_iter()
            .chain(self.columns.iter().map(|c| c.name()))
            .map(str::to_string)
            .collect()
    }

    /// Evaluates every record in input order.
    ///
    /// `shock` is the finite-difference step for stepped columns and is
    /// ignored by modes without them.
    ///
    /// # Errors
    /// - `RiskError::Pricing(InvalidInput)` if stepped columns need a shock
    ///   and none (or a non-positive one) is given
    /// - `RiskError::RecordFailed` for the first failing record, carrying
    ///   the rows completed before it
    pub fn evaluate(&self, shock: Option<f64>) -> Result<BatchTable, RiskError> {
        let shock = self.resolve_shock(shock)?;
        self.log_start(false);

        let mut rows = Vec::with_capacity(self.records.len());
        for record in &self.records {
            match self.evaluate_row(record, shock) {
                Ok(row) => rows.push(row),
                Err(source) => return Err(self.record_failed(record, source, rows)),
            }
        }

        Ok(self.finish(rows))
    }

    /// Parallel [`evaluate`](Self::evaluate); output and error are identical.
    pub fn evaluate_par(&self, shock: Option<f64>) -> Result<BatchTable, RiskError> {
        let shock = self.resolve_shock(shock)?;
        self.log_start(true);

        let outcomes = parallel_map(&self.records, |record| self.evaluate_row(record, shock));

        let mut rows = Vec::with_capacity(outcomes.len());
        for (record, outcome) in self.records.iter().zip(outcomes) {
            match outcome {
                Ok(row) => rows.push(row),
                Err(source) => return Err(self.record_failed(record, source, rows)),
            }
        }

        Ok(self.finish(rows))
    }

    /// Shock size for stepped columns, `None` when the mode has none.
    fn resolve_shock(&self, shock: Option<f64>) -> Result<Option<f64>, RiskError> {
        if !self.columns.iter().any(|c| c.is_stepped()) {
            return Ok(None);
        }
        match shock {
            Some(h) if h > 0.0 && h.is_finite() => Ok(Some(h)),
            Some(h) => Err(PricingError::invalid_input(format!(
                "shock size must be positive and finite: h = {}",
                h
            ))
            .into()),
            None => Err(PricingError::invalid_input(format!(
                "batch mode '{}' for {} records requires a shock size",
                self.mode,
                R::FAMILY
            ))
            .into()),
        }
    }

    fn evaluate_row(&self, record: &R, shock: Option<f64>) -> PricingResult<BatchRow> {
        let values = self
            .columns
            .iter()
            .map(|column| match (column, shock) {
                (BatchColumn::Closed(m), _) => record.evaluate(*m),
                (BatchColumn::Stepped(m), Some(h)) => record.evaluate_stepped(*m, h),
                (BatchColumn::Stepped(m), None) => Err(PricingError::invalid_input(format!(
                    "{} needs a shock size",
                    m.name()
                ))),
            })
            .collect::<PricingResult<Vec<f64>>>()?;

        debug!(id = record.id(), kind = %record.kind(), columns = values.len(), "Batch row evaluated");

        Ok(BatchRow {
            id: record.id(),
            kind: record.kind(),
            identity: record.identity_row(),
            values,
        })
    }

    fn record_failed(&self, record: &R, source: PricingError, rows: Vec<BatchRow>) -> RiskError {
        warn!(
            id = record.id(),
            completed = rows.len(),
            error = %source,
            "Batch record failed"
        );
        RiskError::RecordFailed {
            id: record.id(),
            source,
            partial: Box::new(self.table(rows)),
        }
    }

    fn log_start(&self, parallel: bool) {
        info!(
            family = %R::FAMILY,
            mode = %self.mode,
            records = self.records.len(),
            parallel,
            "Batch evaluation started"
        );
    }

    fn finish(&self, rows: Vec<BatchRow>) -> BatchTable {
        let table = self.table(rows);
        info!(
            family = %R::FAMILY,
            mode = %self.mode,
            rows = table.rows.len(),
            "Batch evaluation completed"
        );
        table
    }

    fn table(&self, rows: Vec<BatchRow>) -> BatchTable {
        BatchTable {
            family: R::FAMILY,
            mode: self.mode,
            header: self.header(),
            rows,
        }
    }
}

/// One evaluated record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BatchRow {
    /// Record id
    pub id: u64,
    /// Record kind
    pub kind: OptionKind,
    /// Identity columns as text (id, kind, parameters)
    pub identity: Vec<String>,
    /// Computed columns
    pub values: Vec<f64>,
}

/// Result of a batch evaluation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BatchTable {
    /// Family of the evaluated records
    pub family: OptionFamily,
    /// Mode the table was produced with
    pub mode: BatchMode,
    /// Header: identity columns then computed columns
    pub header: Vec<String>,
    /// Rows in input order
    pub rows: Vec<BatchRow>,
}

/// Row count and ids of a batch table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BatchSummary {
    /// Number of rows
    pub rows: usize,
    /// Record ids in row order
    pub ids: Vec<u64>,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.ids.iter().map(u64::to_string).collect();
        write!(f, "{} rows (ids: {})", self.rows, ids.join(", "))
    }
}

impl BatchTable {
    /// Row count and ids.
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            rows: self.rows.len(),
            ids: self.rows.iter().map(|r| r.id).collect(),
        }
    }

    /// Value of column `name` in row `index`.
    pub fn value(&self, index: usize, name: &str) -> Option<f64> {
        let offset = self.family.identity_header().len();
        let column = self.header.iter().position(|h| h == name)?.checked_sub(offset)?;
        self.rows.get(index)?.values.get(column).copied()
    }
}

impl Tabular for BatchTable {
    fn header(&self) -> Option<Vec<String>> {
        Some(self.header.clone())
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                let mut cells = row.identity.clone();
                cells.extend(render_values(&row.values));
                cells
            })
            .collect()
    }
}
