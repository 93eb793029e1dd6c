//! File writer for result tables.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use pricer_risk::Tabular;
use serde::Serialize;
use tracing::info;

use super::{file_name, ReportFormat, ReportSink};
use crate::error::SinkError;

/// Writes result tables under an output directory.
///
/// The directory is created on first write. Existing files of the same name
/// are overwritten.
#[derive(Debug, Clone)]
pub struct FileWriter {
    output_dir: PathBuf,
    written_files: Arc<Mutex<Vec<WrittenFile>>>,
}

/// Record of a written file.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenFile {
    /// File path
    pub path: PathBuf,
    /// Output format
    pub format: ReportFormat,
    /// Lines written, header included
    pub rows: usize,
    /// RFC 3339 timestamp
    pub written_at: String,
}

impl FileWriter {
    /// Creates a writer rooted at `output_dir`.
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            written_files: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes `table` as CSV: the header row if any, then the body rows.
    ///
    /// Returns the path written.
    pub fn write_csv(&self, name: &str, table: &dyn Tabular) -> Result<PathBuf, SinkError> {
        let path = self.prepare(name, ReportFormat::Csv)?;
        let file = File::create(&path).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;

        // sweep tables have two rows of different meaning, so row lengths may
        // differ from any header
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);
        let mut rows = 0;
        if let Some(header) = table.header() {
            writer.write_record(&header)?;
            rows += 1;
        }
        for row in table.rows() {
            writer.write_record(&row)?;
            rows += 1;
        }
        writer.flush().map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;

        self.record(&path, ReportFormat::Csv, rows);
        Ok(path)
    }

    /// Writes any serialisable result as pretty-printed JSON.
    pub fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<PathBuf, SinkError> {
        let path = self.prepare(name, ReportFormat::Json)?;
        let text = serde_json::to_string_pretty(value)?;
        fs::write(&path, &text).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;

        self.record(&path, ReportFormat::Json, text.lines().count());
        Ok(path)
    }

    /// Files written so far, oldest first.
    pub fn written_files(&self) -> Vec<WrittenFile> {
        self.written_files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn prepare(&self, name: &str, format: ReportFormat) -> Result<PathBuf, SinkError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| SinkError::Io {
            path: self.output_dir.clone(),
            source,
        })?;
        Ok(self.output_dir.join(file_name(name, format)))
    }

    fn record(&self, path: &Path, format: ReportFormat, rows: usize) {
        let written = WrittenFile {
            path: path.to_path_buf(),
            format,
            rows,
            written_at: chrono::Utc::now().to_rfc3339(),
        };
        self.written_files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(written);

        info!(path = %path.display(), format = format.extension(), rows, "Report written to file");
    }
}

impl ReportSink for FileWriter {
    fn send(&self, name: &str, table: &dyn Tabular) -> Result<(), SinkError> {
        self.write_csv(name, table)?;
        Ok(())
    }
}
