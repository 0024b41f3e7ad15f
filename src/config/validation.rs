use crate::config::types::{Config, CrawlerConfig, ParserConfig};
use crate::url::ExclusionList;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_parser_config(&config.parser)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.start_pages.is_empty() {
        return Err(ConfigError::Validation(
            "start_pages must contain at least one URL".to_string(),
        ));
    }

    for seed in &config.start_pages {
        validate_seed_url(seed)?;
    }

    if config.parallelism < 1 {
        return Err(ConfigError::Validation(format!(
            "parallelism must be >= 1, got {}",
            config.parallelism
        )));
    }

    ExclusionList::new(&config.ignored_urls)?;

    Ok(())
}

/// Validates page parser configuration
fn validate_parser_config(config: &ParserConfig) -> Result<(), ConfigError> {
    if config.timeout_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "parser timeout_seconds must be >= 1, got {}",
            config.timeout_seconds
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    ExclusionList::new(&config.ignored_words)?;

    Ok(())
}

/// Seed URLs must be absolute HTTP(S) URLs
fn validate_seed_url(seed: &str) -> Result<(), ConfigError> {
    let url = Url::parse(seed)
        .map_err(|e| ConfigError::Validation(format!("Invalid start page '{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Start page '{}' must use the http or https scheme",
            seed
        )));
    }

    Ok(())
}
