//! # Report Sinks
//!
//! Destinations for sweep and batch results.
//!
//! ## Modules
//!
//! - [`report_sink`]: CSV and JSON file writer plus a console table printer
//! - [`error`]: Sink errors
//!
//! Any [`Tabular`](pricer_risk::Tabular) result can be sent to any
//! [`ReportSink`](report_sink::ReportSink).

pub mod error;
pub mod report_sink;

pub use error::SinkError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::SinkError;
    pub use crate::report_sink::{ConsolePrinter, FileWriter, ReportFormat, ReportSink, WrittenFile};
}
