//! CSV output
//!
//! Writes a fixed header row followed by one row per record. Skills are
//! flattened into a single comma-joined field; quoting follows the `csv`
//! crate's defaults.

use crate::model::JobRecord;
use crate::output::traits::{OutputResult, RecordSink};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Writes the header and all records to `writer`
pub fn write_csv<W: Write>(writer: W, records: &[JobRecord]) -> OutputResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(JobRecord::CSV_HEADER)?;
    for record in records {
        csv_writer.write_record(record.to_csv_record())?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// [`RecordSink`] that creates (or truncates) a CSV file
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for CsvSink {
    fn write(&self, records: &[JobRecord]) -> OutputResult<PathBuf> {
        let file = File::create(&self.path)?;
        write_csv(file, records)?;

        tracing::debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(self.path.clone())
    }
}
