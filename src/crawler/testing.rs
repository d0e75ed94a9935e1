//! In-memory page sources and markup fixtures for unit tests

use crate::crawler::fetcher::PageSource;
use crate::query::SearchQuery;
use crate::HarvestError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

/// Renders one listing container in the default markup
pub fn listing_html(
    id: &str,
    title: &str,
    locations: &[&str],
    skills: &[&str],
    date: &str,
) -> String {
    let locations: String = locations
        .iter()
        .map(|l| format!("<a href=\"#\">{}</a>", l))
        .collect();
    let skills: String = skills
        .iter()
        .map(|s| format!("<a href=\"#\">{}</a>", s))
        .collect();

    format!(
        r#"<div class="item_recruit" value="{id}">
            <div class="area_job">
                <h2 class="job_tit"><a href="/view?rec_idx={id}" title="{title}"><span>{title}</span></a></h2>
                <div class="job_date"><span class="date">{date}</span></div>
                <div class="job_condition">{locations}</div>
                <div class="job_sector">{skills}</div>
            </div>
        </div>"#
    )
}

/// Renders a result page holding `listings` followed by `pagination`
pub fn results_page(listings: &[String], pagination: &str) -> String {
    format!(
        "<html><head><title>Results</title></head><body><div class=\"content\">{}</div>{}</body></html>",
        listings.concat(),
        pagination
    )
}

/// Pagination block with a "next" link pointing at `target`
pub fn pagination_with_next(entries: usize, target: &str) -> String {
    let spans: String = (1..=entries).map(|i| format!("<span>{}</span>", i)).collect();
    format!(
        "<div class=\"pagination\">{}<a class=\"btnNext\" page=\"{}\">next</a></div>",
        spans, target
    )
}

/// Pagination block with `entries` entries and no "next" link
pub fn pagination_last(entries: usize) -> String {
    let spans: String = (1..=entries).map(|i| format!("<span>{}</span>", i)).collect();
    format!("<div class=\"pagination\">{}</div>", spans)
}

/// A page source serving fixed bodies by URL
///
/// Unknown URLs answer with a 404 transport failure. URLs marked as stalled
/// never complete, and URLs marked as crashing panic inside the fetch.
#[derive(Default)]
pub struct FixtureSource {
    pages: HashMap<String, String>,
    stalled: HashSet<String>,
    crashing: HashSet<String>,
    delay: Option<Duration>,
    requests: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, query: &SearchQuery, index: u32, body: String) -> Self {
        self.pages.insert(query.page_url(index).to_string(), body);
        self
    }

    pub fn stall(mut self, query: &SearchQuery, index: u32) -> Self {
        self.stalled.insert(query.page_url(index).to_string());
        self
    }

    pub fn crash(mut self, query: &SearchQuery, index: u32) -> Self {
        self.crashing.insert(query.page_url(index).to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// URLs requested so far, in request order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Highest number of fetches observed in flight at once
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for FixtureSource {
    async fn fetch(&self, url: &Url) -> crate::Result<String> {
        let key = url.to_string();
        self.requests.lock().unwrap().push(key.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if self.crashing.contains(&key) {
            panic!("fixture fetch crashed on {}", key);
        }
        if self.stalled.contains(&key) {
            std::future::pending::<()>().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.pages
            .get(&key)
            .cloned()
            .ok_or(HarvestError::HttpStatus {
                url: key,
                status: 404,
            })
    }
}
