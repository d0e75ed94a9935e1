//! Crawler module for result page fetching and processing
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching behind the [`PageSource`] seam
//! - Listing extraction and pagination probing
//! - Page count discovery with a swappable fallback heuristic
//! - Concurrency limiting and overall scrape coordination

mod coordinator;
mod fetcher;
mod pagination;
mod parser;
mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::config::FailurePolicy;
pub use coordinator::{run_scrape, Coordinator, PageOutcome, ScrapeOutcome};
pub use fetcher::{build_http_client, fetch_page, HttpPageSource, PageSource};
pub use pagination::{
    discover_page_count, fallback_for, ControlCountFallback, NoFallback, PaginationFallback,
};
pub use parser::{
    extract_job, extract_listings, probe_pagination, ListingSelectors, PaginationProbe,
};
pub use scheduler::Scheduler;
