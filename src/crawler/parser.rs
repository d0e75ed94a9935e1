//! HTML parser for result pages
//!
//! This module handles parsing a search result page to extract:
//! - One [`JobRecord`] per listing container
//! - The pagination controls used to discover how many pages exist

use crate::config::SelectorConfig;
use crate::model::JobRecord;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Compiled selectors for one site's result page markup
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    listing: Selector,
    id_attr: String,
    title: Selector,
    title_attr: String,
    location: Selector,
    skills: Selector,
    date: Selector,
    pagination: Selector,
    next_link: Selector,
    next_attr: String,
    pagination_entry: Selector,
}

impl ListingSelectors {
    /// Compiles every selector in `config`
    ///
    /// # Returns
    ///
    /// * `Ok(ListingSelectors)` - All selectors compiled
    /// * `Err(ConfigError::InvalidSelector)` - A selector is not valid CSS
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            listing: compile_selector("listing", &config.listing)?,
            id_attr: config.id_attr.clone(),
            title: compile_selector("title", &config.title)?,
            title_attr: config.title_attr.clone(),
            location: compile_selector("location", &config.location)?,
            skills: compile_selector("skills", &config.skills)?,
            date: compile_selector("date", &config.date)?,
            pagination: compile_selector("pagination", &config.pagination)?,
            next_link: compile_selector("next_link", &config.next_link)?,
            next_attr: config.next_attr.clone(),
            pagination_entry: compile_selector("pagination_entry", &config.pagination_entry)?,
        })
    }
}

fn compile_selector(name: &str, css: &str) -> Result<Selector, ConfigError> {
    Selector::parse(css)
        .map_err(|e| ConfigError::InvalidSelector(format!("{} = '{}': {}", name, css, e)))
}

/// Projects one listing container onto a [`JobRecord`]
///
/// Never fails: any sub-node or attribute that is absent becomes an empty
/// string (or an empty skill list).
///
/// # Field Rules
///
/// | Field | Source |
/// |-------|--------|
/// | id | id attribute of the container |
/// | title | title attribute of the first heading link |
/// | location | text of every location node, space-joined and trimmed |
/// | skills | text of every skill node, in document order |
/// | date | text of the date node(s) |
pub fn extract_job(listing: ElementRef<'_>, selectors: &ListingSelectors) -> JobRecord {
    let id = listing
        .value()
        .attr(&selectors.id_attr)
        .unwrap_or_default()
        .to_string();

    let title = listing
        .select(&selectors.title)
        .next()
        .and_then(|link| link.value().attr(&selectors.title_attr))
        .unwrap_or_default()
        .to_string();

    let location = listing
        .select(&selectors.location)
        .map(|node| node.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    let skills = listing
        .select(&selectors.skills)
        .map(|node| node.text().collect::<String>())
        .collect();

    let date = listing
        .select(&selectors.date)
        .flat_map(|node| node.text())
        .collect::<String>();

    JobRecord {
        id,
        title,
        location,
        skills,
        date,
    }
}

/// Extracts every listing on a result page, in document order
///
/// A page without listing containers yields an empty vector.
pub fn extract_listings(html: &str, selectors: &ListingSelectors) -> Vec<JobRecord> {
    let document = Html::parse_document(html);

    document
        .select(&selectors.listing)
        .map(|listing| extract_job(listing, selectors))
        .collect()
}

/// Pagination controls found on one result page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationProbe {
    /// Raw target-page attribute of the "next" link, if the page has one
    pub next_page: Option<String>,

    /// Number of pagination entries inside each pagination block, in document order
    pub block_entries: Vec<usize>,
}

/// Reads the pagination controls of a result page
pub fn probe_pagination(html: &str, selectors: &ListingSelectors) -> PaginationProbe {
    let document = Html::parse_document(html);

    let next_page = document
        .select(&selectors.next_link)
        .next()
        .and_then(|link| link.value().attr(&selectors.next_attr))
        .map(str::to_string);

    let block_entries = document
        .select(&selectors.pagination)
        .map(|block| block.select(&selectors.pagination_entry).count())
        .collect();

    PaginationProbe {
        next_page,
        block_entries,
    }
}
