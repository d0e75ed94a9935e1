//! HTTP fetcher implementation
//!
//! This module handles all page retrieval for the crawler, including:
//! - Building HTTP clients with a proper user agent string
//! - The [`PageSource`] seam the discoverer and coordinator fetch through
//! - Fetching one result page and extracting its listings
//!
//! Any network error or non-success status is a transport failure. Bodies are
//! decoded with the response charset, replacing invalid sequences.

use crate::config::UserAgentConfig;
use crate::crawler::parser::{extract_listings, ListingSelectors};
use crate::model::JobRecord;
use crate::query::SearchQuery;
use crate::HarvestError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Something that can retrieve the markup of a result page
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches `url` and returns its body
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The page markup
    /// * `Err(HarvestError)` - Transport or decode failure
    async fn fetch(&self, url: &Url) -> crate::Result<String>;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use job_harvest::config::UserAgentConfig;
/// use job_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), 30).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout_secs: u64,
) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", config.name, config.version);

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageSource`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &Url) -> crate::Result<String> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|source| HarvestError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })
    }
}

/// Fetches result page `index` and extracts every listing on it
///
/// # Returns
///
/// * `Ok(Vec<JobRecord>)` - One record per listing container, in document order
/// * `Err(HarvestError)` - The page could not be retrieved or decoded
pub async fn fetch_page(
    source: &dyn PageSource,
    query: &SearchQuery,
    selectors: &ListingSelectors,
    index: u32,
) -> crate::Result<Vec<JobRecord>> {
    let url = query.page_url(index);
    debug!("Fetching page {}: {}", index, url);

    let body = source.fetch(&url).await?;
    let records = extract_listings(&body, selectors);

    debug!("Page {} yielded {} listings", index, records.len());
    Ok(records)
}
