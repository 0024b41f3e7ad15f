use crate::config::ParserConfig;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchResult};
use crate::crawler::page::{PageParseResult, PageParser};
use crate::crawler::parser::parse_html;
use crate::url::ExclusionList;
use crate::{CrawlError, ParseResult};
use async_trait::async_trait;
use reqwest::Client;

/// A [`PageParser`] that fetches pages over HTTP and parses their HTML
///
/// Links are resolved against the final URL after redirects. Responses that
/// are not HTML parse to an empty page.
#[derive(Debug, Clone)]
pub struct HttpPageParser {
    client: Client,
    ignored_words: ExclusionList,
}

impl HttpPageParser {
    /// Creates a parser from the `[parser]` configuration section
    ///
    /// # Errors
    ///
    /// Fails if an ignored-word pattern does not compile or the HTTP client
    /// cannot be built.
    pub fn new(config: &ParserConfig) -> Result<Self, CrawlError> {
        let client = build_http_client(config)?;
        let ignored_words = ExclusionList::new(&config.ignored_words)?;
        Ok(Self::with_client(client, ignored_words))
    }

    /// Creates a parser around an existing HTTP client
    pub fn with_client(client: Client, ignored_words: ExclusionList) -> Self {
        Self {
            client,
            ignored_words,
        }
    }
}

#[async_trait]
impl PageParser for HttpPageParser {
    async fn parse(&self, url: &str) -> ParseResult<PageParseResult> {
        match fetch_page(&self.client, url).await? {
            FetchResult::Html { final_url, body } => {
                Ok(parse_html(&body, &final_url, &self.ignored_words))
            }
            FetchResult::NotHtml { content_type } => {
                tracing::debug!("Skipping non-HTML content at {}: {}", url, content_type);
                Ok(PageParseResult::empty())
            }
        }
    }
}
