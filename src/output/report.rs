//! Scrape report
//!
//! Summary of one completed scrape, printed by the CLI and logged by the server.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Outcome of a completed scrape
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    /// Cleaned search term
    pub term: String,

    /// Number of result pages discovered
    pub page_count: u32,

    /// Number of records written
    pub record_count: usize,

    /// Pages left out under the skip-page failure policy
    pub skipped_pages: Vec<u32>,

    /// Path of the written artifact
    pub output_path: PathBuf,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ScrapeReport {
    /// Wall-clock duration of the scrape in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Number of pages that contributed records
    pub fn pages_fetched(&self) -> u32 {
        self.page_count
            .saturating_sub(self.skipped_pages.len() as u32)
    }
}

/// Prints a scrape report to stdout
pub fn print_report(report: &ScrapeReport) {
    println!("=== Scrape Report ===\n");

    println!("Search:");
    println!("  Term: {}", report.term);
    println!("  Started: {}", report.started_at.to_rfc3339());
    println!("  Duration: {:.2}s", report.duration_seconds());
    println!();

    println!("Pages:");
    println!("  Discovered: {}", report.page_count);
    println!("  Fetched: {}", report.pages_fetched());
    if !report.skipped_pages.is_empty() {
        println!("  Skipped ({}):", report.skipped_pages.len());
        for page in &report.skipped_pages {
            println!("    - {}", page);
        }
    }
    println!();

    println!(
        "Done extracted: {} records -> {}",
        report.record_count,
        report.output_path.display()
    );
}
