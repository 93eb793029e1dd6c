//! Report output destinations.

mod console;
mod file_writer;

pub use console::ConsolePrinter;
pub use file_writer::{FileWriter, WrittenFile};

use pricer_risk::Tabular;
use serde::{Deserialize, Serialize};

use crate::error::SinkError;

/// Destination for tabular results.
pub trait ReportSink: Send + Sync {
    /// Sends `table` under the report name `name`.
    fn send(&self, name: &str, table: &dyn Tabular) -> Result<(), SinkError>;
}

/// File format of a written report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Comma separated rows
    Csv,
    /// Pretty-printed JSON document
    Json,
}

impl ReportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

/// Appends the format extension unless `name` already carries one.
pub(crate) fn file_name(name: &str, format: ReportFormat) -> String {
    let suffix = format!(".{}", format.extension());
    if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("sweep", ReportFormat::Csv), "sweep.csv");
        assert_eq!(file_name("sweep.csv", ReportFormat::Csv), "sweep.csv");
        assert_eq!(file_name("batch.csv", ReportFormat::Json), "batch.csv.json");
    }
}
