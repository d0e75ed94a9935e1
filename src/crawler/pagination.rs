//! Result page count discovery
//!
//! Discovery starts at page 1 and follows the "next" link's target page number
//! until a page has no such link. That page is treated as the last probed page
//! and a [`PaginationFallback`] decides how many further pages its pagination
//! block still implies.

use crate::config::FallbackKind;
use crate::crawler::fetcher::PageSource;
use crate::crawler::parser::{probe_pagination, ListingSelectors, PaginationProbe};
use crate::query::SearchQuery;
use crate::HarvestError;
use tracing::{debug, info};

/// Strategy applied to the last probed page when it has no "next" link
pub trait PaginationFallback: Send + Sync {
    /// Number of pages to add to the current page index
    fn extra_pages(&self, probe: &PaginationProbe) -> u32;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Counts the entries of every pagination block and adds `entries - 1` per block
///
/// The last entry of a block is assumed to be a "last page" control rather than
/// a page number. A page with no pagination block adds nothing, and an empty
/// block also adds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlCountFallback;

impl PaginationFallback for ControlCountFallback {
    fn extra_pages(&self, probe: &PaginationProbe) -> u32 {
        probe
            .block_entries
            .iter()
            .map(|&entries| entries.saturating_sub(1) as u32)
            .fold(0u32, u32::saturating_add)
    }

    fn name(&self) -> &'static str {
        "control-count"
    }
}

/// Stops at the last probed page
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl PaginationFallback for NoFallback {
    fn extra_pages(&self, _probe: &PaginationProbe) -> u32 {
        0
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Returns the fallback strategy selected in configuration
pub fn fallback_for(kind: FallbackKind) -> Box<dyn PaginationFallback> {
    match kind {
        FallbackKind::ControlCount => Box::new(ControlCountFallback),
        FallbackKind::None => Box::new(NoFallback),
    }
}

/// Determines how many result pages the search has
///
/// # Algorithm
///
/// 1. Request page `current` (starting at 1)
/// 2. If the page has a "next" link, parse its target page number, move
///    `current` to it and repeat
/// 3. Otherwise return `current + fallback.extra_pages(..)`
///
/// # Errors
///
/// * Transport or decode failure of any probed page
/// * `MalformedPagination` - the target attribute is not an unsigned integer
/// * `PaginationStalled` - the target does not advance past `current`
pub async fn discover_page_count(
    source: &dyn PageSource,
    query: &SearchQuery,
    selectors: &ListingSelectors,
    fallback: &dyn PaginationFallback,
) -> crate::Result<u32> {
    let mut current: u32 = 1;

    loop {
        let url = query.page_url(current);
        debug!("Probing pagination on page {}: {}", current, url);

        let body = source.fetch(&url).await?;
        let probe = probe_pagination(&body, selectors);

        let Some(raw) = probe.next_page.as_deref() else {
            let extra = fallback.extra_pages(&probe);
            info!(
                "Last probed page is {}; {} fallback adds {}",
                current,
                fallback.name(),
                extra
            );
            return Ok(current.saturating_add(extra));
        };

        let target = raw
            .trim()
            .parse::<u32>()
            .map_err(|_| HarvestError::MalformedPagination {
                url: url.to_string(),
                value: raw.to_string(),
            })?;

        if target <= current {
            return Err(HarvestError::PaginationStalled {
                url: url.to_string(),
                current,
                target,
            });
        }

        current = target;
    }
}
