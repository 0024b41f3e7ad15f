//! Crawler module
//!
//! This module contains the parallel crawl engine and the page parser it
//! drives:
//! - `CrawlEngine`: validates a request, runs one task tree per seed and builds the report
//! - `CrawlTask`: the recursive, depth- and deadline-bounded unit of work
//! - `PageParser`: the capability that turns a URL into words and links
//! - `HttpPageParser`: a `PageParser` that fetches pages over HTTP and parses their HTML

mod engine;
mod fetcher;
mod http_parser;
mod page;
mod parser;
mod request;
mod task;

pub use engine::{hardware_concurrency, CrawlEngine};
pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub use http_parser::HttpPageParser;
pub use page::{PageParseResult, PageParser};
pub use parser::parse_html;
pub use request::{CrawlReport, CrawlRequest, Deadline};

pub use crate::config::ParseFailurePolicy;

use crate::CrawlError;
use async_trait::async_trait;

/// The public contract of a crawler
///
/// Implemented by [`CrawlEngine`] and by decorators such as
/// [`ProfiledCrawler`](crate::profiler::ProfiledCrawler), which must pass
/// arguments, results and errors through unchanged.
#[async_trait]
pub trait Crawler: Send + Sync {
    /// Crawls from the request's seed URLs and returns the final report
    ///
    /// Completes only once every task spawned for this request has settled.
    async fn crawl(&self, request: &CrawlRequest) -> Result<CrawlReport, CrawlError>;

    /// Number of page parses this crawler runs in parallel at most
    fn max_parallelism(&self) -> usize;
}
