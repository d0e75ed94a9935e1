//! Output module for scrape results
//!
//! This module handles:
//! - Writing the aggregated records as CSV
//! - Summarizing a completed scrape

mod csv_sink;
pub mod report;
mod traits;

pub use csv_sink::{write_csv, CsvSink};
pub use report::{print_report, ScrapeReport};
pub use traits::{OutputError, OutputResult, RecordSink};
