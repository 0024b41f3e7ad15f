use crate::ParseResult;
use async_trait::async_trait;
use std::collections::HashMap;

/// Words and links extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParseResult {
    /// Occurrences of each word on the page
    pub word_counts: HashMap<String, u64>,

    /// Outbound links, in document order
    pub links: Vec<String>,
}

impl PageParseResult {
    /// A page with no words and no links
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Turns a URL into a [`PageParseResult`]
///
/// The crawl engine hands implementations a URL string exactly as it was
/// discovered and does no validation of its own. Implementations are shared
/// by every task of a crawl and must be thread-safe.
#[async_trait]
pub trait PageParser: Send + Sync {
    /// Fetches and parses the page at `url`
    async fn parse(&self, url: &str) -> ParseResult<PageParseResult>;
}
