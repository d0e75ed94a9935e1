use crate::config::types::{Config, CrawlerConfig, SelectorConfig, ServerConfig, SiteConfig};
use crate::ConfigError;
use scraper::Selector;
use std::net::SocketAddr;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_selector_config(&config.selectors)?;
    validate_crawler_config(&config.crawler)?;
    validate_server_config(&config.server)?;

    if config.output.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the search endpoint
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.term_param.is_empty() || config.page_param.is_empty() {
        return Err(ConfigError::Validation(
            "term_param and page_param cannot be empty".to_string(),
        ));
    }

    if config.term_param == config.page_param {
        return Err(ConfigError::Validation(format!(
            "term_param and page_param must differ, both are '{}'",
            config.term_param
        )));
    }

    Ok(())
}

/// Validates that every selector compiles and attribute names are present
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    for (name, selector) in [
        ("listing", &config.listing),
        ("title", &config.title),
        ("location", &config.location),
        ("skills", &config.skills),
        ("date", &config.date),
        ("pagination", &config.pagination),
        ("next_link", &config.next_link),
        ("pagination_entry", &config.pagination_entry),
    ] {
        Selector::parse(selector).map_err(|e| {
            ConfigError::InvalidSelector(format!("{} = '{}': {}", name, selector, e))
        })?;
    }

    for (name, attr) in [
        ("id_attr", &config.id_attr),
        ("title_attr", &config.title_attr),
        ("next_attr", &config.next_attr),
    ] {
        if attr.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_pages < 1 || config.max_concurrent_pages > 256 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_pages must be between 1 and 256, got {}",
            config.max_concurrent_pages
        )));
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be > 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!("Invalid server bind '{}': {}", config.bind, e))
    })?;
    Ok(())
}
