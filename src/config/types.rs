use serde::Deserialize;

/// Main configuration structure for Job-Harvest
///
/// Every section is optional; the defaults target the Saramin recruit search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub selectors: SelectorConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub server: ServerConfig,
}

/// Search endpoint of the remote site
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Search results URL, without query parameters
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Query parameter carrying the search term
    #[serde(rename = "term-param")]
    pub term_param: String,

    /// Query parameter carrying the page index
    #[serde(rename = "page-param")]
    pub page_param: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.saramin.co.kr/zf_user/search/recruit".to_string(),
            term_param: "searchword".to_string(),
            page_param: "recruitPage".to_string(),
        }
    }
}

/// CSS selectors describing the result page markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One node per job listing
    pub listing: String,

    /// Attribute of the listing node holding its id
    #[serde(rename = "id-attr")]
    pub id_attr: String,

    /// Heading link inside a listing
    pub title: String,

    /// Attribute of the heading link holding the title
    #[serde(rename = "title-attr")]
    pub title_attr: String,

    /// Location fragments inside a listing
    pub location: String,

    /// Skill tags inside a listing
    pub skills: String,

    /// Deadline node inside a listing
    pub date: String,

    /// Pagination control block
    pub pagination: String,

    /// "Next page" link
    #[serde(rename = "next-link")]
    pub next_link: String,

    /// Attribute of the next link holding the target page number
    #[serde(rename = "next-attr")]
    pub next_attr: String,

    /// Entries counted inside a pagination block by the fallback heuristic
    #[serde(rename = "pagination-entry")]
    pub pagination_entry: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            listing: ".item_recruit".to_string(),
            id_attr: "value".to_string(),
            title: "h2.job_tit a".to_string(),
            title_attr: "title".to_string(),
            location: "div.job_condition a".to_string(),
            skills: "div.job_sector a".to_string(),
            date: "div.job_date span.date".to_string(),
            pagination: ".pagination".to_string(),
            next_link: "div.pagination a.btnNext".to_string(),
            next_attr: "page".to_string(),
            pagination_entry: "span".to_string(),
        }
    }
}

/// What the coordinator does when a single page fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Any failed page fails the whole scrape
    #[default]
    AbortAll,
    /// Failed pages are logged and left out of the result
    SkipPage,
}

/// Which heuristic runs when the last probed page has no "next" link
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackKind {
    /// Add (entries - 1) per pagination block
    #[default]
    ControlCount,
    /// Stop at the last probed page
    None,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of page fetches in flight
    #[serde(rename = "max-concurrent-pages")]
    pub max_concurrent_pages: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    #[serde(rename = "failure-policy")]
    pub failure_policy: FailurePolicy,

    #[serde(rename = "pagination-fallback")]
    pub pagination_fallback: FallbackKind,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_pages: 16,
            request_timeout_secs: 30,
            failure_policy: FailurePolicy::default(),
            pagination_fallback: FallbackKind::default(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub name: String,
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV file written by the `scrape` command
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "jobs.csv".to_string(),
        }
    }
}

/// HTTP trigger surface configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:1323".to_string(),
        }
    }
}
