use crate::config::{CrawlerConfig, ParseFailurePolicy};
use crate::output::RankedWords;
use crate::url::ExclusionList;
use crate::ConfigError;
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// Parameters of a single crawl
///
/// Built once per crawl invocation and never mutated by the engine.
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    /// Seed URLs, launched in order
    pub start_pages: Vec<String>,

    /// Wall-clock budget; no new page is started once it has elapsed
    pub timeout: Duration,

    /// Maximum link-following depth; a seed is at depth 1
    pub max_depth: u32,

    /// Number of entries in the popular-word table
    pub popular_word_count: usize,

    /// URLs matching any of these patterns are never visited
    pub ignored_urls: ExclusionList,

    /// Requested number of parallel page parses
    pub parallelism: usize,

    /// What to do when the page parser fails
    pub on_parse_failure: ParseFailurePolicy,
}

impl CrawlRequest {
    /// Creates a request with no time limit, depth 10, a 100-word table and
    /// no exclusions
    pub fn new<I, S>(start_pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            start_pages: start_pages.into_iter().map(Into::into).collect(),
            timeout: Duration::MAX,
            max_depth: 10,
            popular_word_count: 100,
            ignored_urls: ExclusionList::default(),
            parallelism: super::hardware_concurrency(),
            on_parse_failure: ParseFailurePolicy::default(),
        }
    }

    /// Builds a request from the `[crawler]` configuration section
    ///
    /// Compiles the ignored URL patterns and validates the result.
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, ConfigError> {
        let request = Self {
            start_pages: config.start_pages.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            max_depth: config.max_depth,
            popular_word_count: config.popular_word_count,
            ignored_urls: ExclusionList::new(&config.ignored_urls)?,
            parallelism: config.parallelism,
            on_parse_failure: config.on_parse_failure,
        };

        request.validate()?;
        Ok(request)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_popular_word_count(mut self, popular_word_count: usize) -> Self {
        self.popular_word_count = popular_word_count;
        self
    }

    pub fn with_ignored_urls(mut self, ignored_urls: ExclusionList) -> Self {
        self.ignored_urls = ignored_urls;
        self
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_parse_failure_policy(mut self, policy: ParseFailurePolicy) -> Self {
        self.on_parse_failure = policy;
        self
    }

    /// Checks the request before any task is scheduled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_pages.is_empty() {
            return Err(ConfigError::Validation(
                "start_pages must contain at least one URL".to_string(),
            ));
        }

        if self.parallelism < 1 {
            return Err(ConfigError::Validation(format!(
                "parallelism must be >= 1, got {}",
                self.parallelism
            )));
        }

        Ok(())
    }
}

/// The instant after which no new crawl task may start
///
/// Computed once per crawl and shared by every task. A timeout too large to
/// represent means the crawl has no deadline.
#[derive(Debug, Clone, Copy)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// A deadline `timeout` from now
    pub fn after(timeout: Duration) -> Self {
        Self(Instant::now().checked_add(timeout))
    }

    /// Returns true once the current time is at or past the deadline
    pub fn has_passed(&self) -> bool {
        match self.0 {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}

/// Final output of a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    /// The most popular words, in rank order
    #[serde(rename = "wordCounts")]
    pub word_counts: RankedWords,

    /// Number of distinct URLs visited
    #[serde(rename = "urlsVisited")]
    pub urls_visited: usize,
}
