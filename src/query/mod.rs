//! Search query handling for Job-Harvest
//!
//! This module turns a free-text search term into the base query URL and the
//! per-page URLs the crawler requests.

mod term;

pub use term::clean_term;

use crate::config::SiteConfig;
use url::Url;

/// A search against the configured site for one cleaned term
#[derive(Debug, Clone)]
pub struct SearchQuery {
    term: String,
    base: Url,
    page_param: String,
}

impl SearchQuery {
    /// Builds the base query URL for `term`
    ///
    /// The term is cleaned with [`clean_term`] before it is encoded.
    ///
    /// # Example
    ///
    /// ```
    /// use job_harvest::config::SiteConfig;
    /// use job_harvest::SearchQuery;
    ///
    /// let query = SearchQuery::new(&SiteConfig::default(), "  rust  ").unwrap();
    /// assert_eq!(query.term(), "rust");
    /// assert!(query.page_url(2).as_str().ends_with("searchword=rust&recruitPage=2"));
    /// ```
    pub fn new(site: &SiteConfig, term: &str) -> crate::Result<Self> {
        let term = clean_term(term);
        let base = Url::parse_with_params(
            &site.base_url,
            &[(site.term_param.as_str(), term.as_str())],
        )?;

        Ok(Self {
            term,
            base,
            page_param: site.page_param.clone(),
        })
    }

    /// The cleaned search term
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The base query URL, without a page index
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// The URL of result page `index`
    pub fn page_url(&self, index: u32) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair(&self.page_param, &index.to_string());
        url
    }
}
