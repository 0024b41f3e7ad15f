//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made by the page parser:
//! - Building HTTP clients with the configured user agent and timeout
//! - GET requests for page content
//! - Content-Type screening and error classification
//!
//! Failed fetches are not retried; the crawl's parse-failure policy decides
//! what happens next.

use crate::config::ParserConfig;
use crate::ParseError;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use url::Url;

/// Result of a successful fetch
#[derive(Debug)]
pub enum FetchResult {
    /// An HTML (or untyped) page
    Html {
        /// Final URL after redirects
        final_url: Url,
        /// Page body content
        body: String,
    },

    /// The server returned something other than HTML
    NotHtml {
        /// The Content-Type received
        content_type: String,
    },
}

/// Builds an HTTP client from the parser configuration
///
/// # Example
///
/// ```no_run
/// use word_crawler::config::ParserConfig;
/// use word_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&ParserConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ParserConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.timeout_seconds);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page
///
/// | Condition | Result |
/// |-----------|--------|
/// | URL does not parse, or is not http(s) | `Err(InvalidUrl)` |
/// | Connection error, timeout | `Err(Http)` |
/// | Non-2xx status | `Err(Status)` |
/// | Content-Type present and not HTML | `Ok(NotHtml)` |
/// | Otherwise | `Ok(Html)` |
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchResult, ParseError> {
    let parsed = Url::parse(url).map_err(|e| ParseError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ParseError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|source| ParseError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ParseError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html_content_type(&content_type) {
        return Ok(FetchResult::NotHtml { content_type });
    }

    let final_url = response.url().clone();
    let body = response.text().await.map_err(|source| ParseError::Http {
        url: url.to_string(),
        source,
    })?;

    Ok(FetchResult::Html { final_url, body })
}

/// An absent Content-Type is given the benefit of the doubt
fn is_html_content_type(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.is_empty()
        || content_type.contains("text/html")
        || content_type.contains("application/xhtml+xml")
}
