use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Seed URLs, crawled in order
    #[serde(rename = "start-pages")]
    pub start_pages: Vec<String>,

    /// Maximum link-following depth; a seed is at depth 1
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Wall-clock budget for the whole crawl (seconds)
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Number of entries in the popular-word table
    #[serde(rename = "popular-word-count")]
    pub popular_word_count: usize,

    /// Requested number of parallel workers
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,

    /// URL patterns that are never visited (full match)
    #[serde(rename = "ignored-urls", default)]
    pub ignored_urls: Vec<String>,

    /// What to do when a page cannot be parsed
    #[serde(rename = "on-parse-failure", default)]
    pub on_parse_failure: ParseFailurePolicy,
}

/// Page parser configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Word patterns dropped from page word counts (full match)
    #[serde(rename = "ignored-words", default)]
    pub ignored_words: Vec<String>,

    /// Per-page request timeout (seconds)
    #[serde(rename = "timeout-seconds", default = "default_parser_timeout")]
    pub timeout_seconds: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            ignored_words: Vec::new(),
            timeout_seconds: default_parser_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Output configuration; absent paths mean stdout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON crawl result
    #[serde(rename = "result-path", default)]
    pub result_path: Option<String>,

    /// Path the profiling report is appended to
    #[serde(rename = "profile-path", default)]
    pub profile_path: Option<String>,
}

/// Policy applied when the page parser fails for a URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseFailurePolicy {
    /// Treat the page as having no words and no links
    #[default]
    Skip,
    /// Fail the whole crawl
    Abort,
}

fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn default_parser_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("word-crawler/{}", env!("CARGO_PKG_VERSION"))
}

impl OutputConfig {
    /// Result destination; `None` (or an empty path) means stdout
    pub fn result_path(&self) -> Option<&Path> {
        non_empty_path(self.result_path.as_deref())
    }

    /// Profile destination; `None` (or an empty path) means stdout
    pub fn profile_path(&self) -> Option<&Path> {
        non_empty_path(self.profile_path.as_deref())
    }
}

fn non_empty_path(path: Option<&str>) -> Option<&Path> {
    path.filter(|p| !p.trim().is_empty()).map(Path::new)
}
