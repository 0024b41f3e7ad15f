//! HTML parser for extracting words and links
//!
//! This module handles parsing HTML content to extract:
//! - Visible words and their counts (script and style contents are skipped)
//! - Links to follow (from `<a href>` tags)

use crate::crawler::page::PageParseResult;
use crate::url::ExclusionList;
use scraper::{Html, Selector};
use std::collections::HashMap;
use url::Url;

/// Elements whose text is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Parses HTML content and extracts word counts and links
///
/// # Word Extraction Rules
///
/// - Text is split on whitespace
/// - Non-alphanumeric characters are removed and the rest lowercased
/// - Empty words and words fully matching an ignored pattern are dropped
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` resolved against `base_url`, http(s) only,
/// with any fragment removed
///
/// **Exclude:** `javascript:`, `mailto:`, `tel:` and `data:` links,
/// fragment-only links and `<a download>` links
///
/// # Example
///
/// ```
/// use word_crawler::crawler::parse_html;
/// use word_crawler::url::ExclusionList;
/// use url::Url;
///
/// let html = r#"<html><body><p>Hello, hello world!</p><a href="/next">Next</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = parse_html(html, &base_url, &ExclusionList::default());
/// assert_eq!(page.word_counts["hello"], 2);
/// assert_eq!(page.links, vec!["https://example.com/next".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, ignored_words: &ExclusionList) -> PageParseResult {
    let document = Html::parse_document(html);

    PageParseResult {
        word_counts: extract_words(&document, ignored_words),
        links: extract_links(&document, base_url),
    }
}

/// Counts the visible words of the document
fn extract_words(document: &Html, ignored_words: &ExclusionList) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |element| HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }

        for raw in text.split_whitespace() {
            let word = normalize_word(raw);
            if word.is_empty() || ignored_words.is_excluded(&word) {
                continue;
            }
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    counts
}

/// Strips non-alphanumeric characters and lowercases
fn normalize_word(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Extracts all followable links from the HTML document, in document order
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Same-page anchors
    if href.starts_with('#') {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    absolute_url.set_fragment(None);
    Some(absolute_url.to_string())
}
