//! Output sink trait and errors

use crate::model::JobRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for the aggregated record set of a scrape
pub trait RecordSink: Send + Sync {
    /// Writes `records` and returns the path of the produced artifact
    ///
    /// Any failure is fatal; no partial artifact is reported.
    fn write(&self, records: &[JobRecord]) -> OutputResult<PathBuf>;
}
