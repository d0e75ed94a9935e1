//! Job-Harvest: a paginated job-listing scraper
//!
//! This crate discovers how many result pages a job search has, fetches every
//! page concurrently, extracts one record per listing and writes the combined
//! set to a CSV file.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod query;
pub mod server;

use thiserror::Error;

/// Main error type for Job-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request failed for {url}: status {status}")]
    HttpStatus { url: String, status: u16 },

    /// A page source could not turn the body into markup. The HTTP source
    /// decodes lossily and never reports this.
    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("Malformed next-page value {value:?} on {url}")]
    MalformedPagination { url: String, value: String },

    #[error("Pagination did not advance on {url}: page {current} links to page {target}")]
    PaginationStalled {
        url: String,
        current: u32,
        target: u32,
    },

    #[error("Fetch tasks for pages {pages:?} ended without reporting")]
    PageTaskLost { pages: Vec<u32> },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarvestError {
    /// Returns true for transport-level failures (network error or non-success status)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::HttpStatus { .. } | Self::Reqwest(_)
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Job-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, FailurePolicy};
pub use model::JobRecord;
pub use query::{clean_term, SearchQuery};
