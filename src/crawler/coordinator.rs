//! Scrape coordinator - main scrape orchestration logic
//!
//! This module contains the scrape flow that ties the crawler together:
//! - Cleaning the term and building the base query
//! - Discovering the page count
//! - Spawning one fetch task per page, gated by the scheduler
//! - Receiving exactly one outcome per page on a single channel
//! - Handing the aggregate to the output sink

use crate::config::{Config, FailurePolicy, SiteConfig};
use crate::crawler::fetcher::{build_http_client, fetch_page, HttpPageSource, PageSource};
use crate::crawler::pagination::{discover_page_count, fallback_for, PaginationFallback};
use crate::crawler::parser::ListingSelectors;
use crate::crawler::scheduler::Scheduler;
use crate::model::JobRecord;
use crate::output::{RecordSink, ScrapeReport};
use crate::query::SearchQuery;
use crate::HarvestError;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Result of fetching one page, sent from its task to the coordinator
#[derive(Debug)]
pub struct PageOutcome {
    pub page: u32,
    pub result: crate::Result<Vec<JobRecord>>,
}

/// Aggregated records of one scrape, before they reach a sink
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    /// Cleaned search term
    pub term: String,

    /// Number of pages discovered (and received)
    pub page_count: u32,

    /// Records of every successful page, in batch arrival order
    pub records: Vec<JobRecord>,

    /// Pages dropped under [`FailurePolicy::SkipPage`], sorted
    pub skipped_pages: Vec<u32>,
}

/// Main scrape coordinator structure
pub struct Coordinator {
    site: SiteConfig,
    source: Arc<dyn PageSource>,
    selectors: Arc<ListingSelectors>,
    fallback: Box<dyn PaginationFallback>,
    scheduler: Scheduler,
    policy: FailurePolicy,
}

impl Coordinator {
    /// Creates a coordinator fetching over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - Invalid selectors or HTTP client failure
    pub fn new(config: &Config) -> crate::Result<Self> {
        let client = build_http_client(&config.user_agent, config.crawler.request_timeout_secs)?;
        Self::with_source(config, Arc::new(HttpPageSource::new(client)))
    }

    /// Creates a coordinator fetching through `source`
    pub fn with_source(config: &Config, source: Arc<dyn PageSource>) -> crate::Result<Self> {
        let selectors = ListingSelectors::compile(&config.selectors)?;

        Ok(Self {
            site: config.site.clone(),
            source,
            selectors: Arc::new(selectors),
            fallback: fallback_for(config.crawler.pagination_fallback),
            scheduler: Scheduler::new(config.crawler.max_concurrent_pages as usize),
            policy: config.crawler.failure_policy,
        })
    }

    /// Replaces the pagination fallback strategy
    pub fn with_fallback(mut self, fallback: Box<dyn PaginationFallback>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Discovers, fetches and aggregates every result page for `term`
    ///
    /// One task is spawned per page index in `0..page_count`. Each task sends
    /// exactly one [`PageOutcome`]; the coordinator performs exactly
    /// `page_count` receives and is the only owner of the aggregate. There is
    /// no timeout: a page that never completes stalls the scrape.
    ///
    /// Under [`FailurePolicy::AbortAll`] the first failed page aborts the
    /// remaining tasks and is returned as the error. The tasks are owned by
    /// this future, so dropping it aborts every outstanding fetch.
    pub async fn collect(&self, term: &str) -> crate::Result<ScrapeOutcome> {
        let query = SearchQuery::new(&self.site, term)?;
        info!("Searching for '{}': {}", query.term(), query.base_url());

        let page_count = discover_page_count(
            self.source.as_ref(),
            &query,
            &self.selectors,
            self.fallback.as_ref(),
        )
        .await?;
        info!(
            "Discovered {} result pages, fetching with up to {} concurrent requests",
            page_count,
            self.scheduler.max_concurrent()
        );

        let (tx, mut rx) = mpsc::channel::<PageOutcome>(page_count.max(1) as usize);
        let mut tasks = JoinSet::new();
        for page in 0..page_count {
            let tx = tx.clone();
            let source = Arc::clone(&self.source);
            let selectors = Arc::clone(&self.selectors);
            let scheduler = self.scheduler.clone();
            let query = query.clone();

            tasks.spawn(async move {
                let _permit = scheduler.acquire().await;
                let result = fetch_page(source.as_ref(), &query, &selectors, page).await;
                let _ = tx.send(PageOutcome { page, result }).await;
            });
        }
        drop(tx);

        let mut records = Vec::new();
        let mut skipped_pages = Vec::new();
        let mut received = vec![false; page_count as usize];

        for _ in 0..page_count {
            // The channel only closes once every task has ended, so the
            // unreported pages are exactly the lost ones
            let Some(outcome) = rx.recv().await else {
                let pages = (0..page_count)
                    .filter(|&page| !received[page as usize])
                    .collect();
                return Err(HarvestError::PageTaskLost { pages });
            };

            if let Some(slot) = received.get_mut(outcome.page as usize) {
                *slot = true;
            }

            match outcome.result {
                Ok(batch) => records.extend(batch),
                Err(e) => match self.policy {
                    FailurePolicy::AbortAll => {
                        tasks.abort_all();
                        return Err(e);
                    }
                    FailurePolicy::SkipPage => {
                        warn!("Skipping page {}: {}", outcome.page, e);
                        skipped_pages.push(outcome.page);
                    }
                },
            }
        }

        skipped_pages.sort_unstable();
        Ok(ScrapeOutcome {
            term: query.term().to_string(),
            page_count,
            records,
            skipped_pages,
        })
    }

    /// Runs a complete scrape for `term` and writes the result to `sink`
    ///
    /// Nothing is written unless every page was received.
    pub async fn scrape(&self, term: &str, sink: &dyn RecordSink) -> crate::Result<ScrapeReport> {
        let started_at = Utc::now();
        let outcome = self.collect(term).await?;

        let output_path = sink.write(&outcome.records)?;
        info!(
            "Done extracted: {} records from {} pages",
            outcome.records.len(),
            outcome.page_count
        );

        Ok(ScrapeReport {
            term: outcome.term,
            page_count: outcome.page_count,
            record_count: outcome.records.len(),
            skipped_pages: outcome.skipped_pages,
            output_path,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

/// Runs a scrape with the HTTP page source and the given sink
///
/// # Example
///
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use job_harvest::config::Config;
/// use job_harvest::crawler::run_scrape;
/// use job_harvest::output::CsvSink;
///
/// let report = run_scrape(&Config::default(), "rust", &CsvSink::new("jobs.csv")).await?;
/// println!("{} records", report.record_count);
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(
    config: &Config,
    term: &str,
    sink: &dyn RecordSink,
) -> crate::Result<ScrapeReport> {
    Coordinator::new(config)?.scrape(term, sink).await
}
