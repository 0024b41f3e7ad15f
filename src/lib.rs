//! word-crawler: a parallel, depth- and time-bounded word frequency crawler
//!
//! This crate crawls a set of seed pages, follows links up to a bounded depth
//! within a bounded wall-clock time, and reports the most popular words seen
//! across every visited page.

pub mod config;
pub mod crawler;
pub mod output;
pub mod profiler;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to parse page {url}: {source}")]
    Parse { url: String, source: ParseError },

    #[error("Worker pool error: {0}")]
    Pool(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Errors produced by a page parser for a single URL
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Errors raised while setting up profiling
#[derive(Debug, Error)]
pub enum ProfilerError {
    #[error("{component} has no operations marked for profiling")]
    NoProfiledOperations { component: String },
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for page parsing
pub type ParseResult<T> = std::result::Result<T, ParseError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{
    CrawlEngine, CrawlReport, CrawlRequest, Crawler, HttpPageParser, PageParseResult, PageParser,
};
pub use output::{rank, RankedWords};
pub use state::{VisitedRegistry, WordCountAggregator};
