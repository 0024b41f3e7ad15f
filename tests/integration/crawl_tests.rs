//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use std::io::Write;
use std::sync::Arc;
use tempfile::{NamedTempFile, TempDir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use word_crawler::config::{load_config, ParseFailurePolicy, ParserConfig};
use word_crawler::output::write_report;
use word_crawler::profiler::{Operation, Profiler};
use word_crawler::url::ExclusionList;
use word_crawler::{CrawlEngine, CrawlError, CrawlRequest, Crawler, HttpPageParser};

/// Serves `html` at `page_path`, expecting exactly `times` requests
async fn mount_page(server: &MockServer, page_path: &str, html: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html.as_bytes().to_vec(), "text/html"))
        .expect(times)
        .mount(server)
        .await;
}

fn engine_with(config: &ParserConfig) -> CrawlEngine {
    let parser = HttpPageParser::new(config).expect("Failed to build page parser");
    CrawlEngine::new(Arc::new(parser), 4)
}

fn engine() -> CrawlEngine {
    engine_with(&ParserConfig::default())
}

fn seed(server: &MockServer) -> String {
    format!("{}/", server.uri())
}

/// Three pages linking to each other, including a cycle back to the seed
async fn mount_site(server: &MockServer) {
    mount_page(
        server,
        "/",
        r#"<html><body><p>alpha beta</p><a href="/a">one</a><a href="/b">two</a></body></html>"#,
        1,
    )
    .await;
    mount_page(
        server,
        "/a",
        r#"<html><body><p>alpha gamma</p><a href="/">home</a></body></html>"#,
        1,
    )
    .await;
    mount_page(
        server,
        "/b",
        r#"<html><body><p>alpha</p><a href="/a">one</a></body></html>"#,
        1,
    )
    .await;
}

#[tokio::test]
async fn test_full_crawl_follows_links_once() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let request = CrawlRequest::new([seed(&server)]).with_max_depth(3);
    let report = engine().crawl(&request).await.expect("Crawl failed");

    assert_eq!(report.urls_visited, 3);

    let words: Vec<(&str, u64)> = report.word_counts.iter().collect();
    assert_eq!(
        words,
        vec![
            ("alpha", 3),
            ("one", 2),
            ("gamma", 1),
            ("beta", 1),
            ("home", 1),
            ("two", 1),
        ]
    );
}

#[tokio::test]
async fn test_popular_word_count_limits_report() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let request = CrawlRequest::new([seed(&server)])
        .with_max_depth(3)
        .with_popular_word_count(2);
    let report = engine().crawl(&request).await.expect("Crawl failed");

    assert_eq!(report.urls_visited, 3);
    assert_eq!(
        report.word_counts.entries(),
        &[("alpha".to_string(), 3), ("one".to_string(), 2)]
    );
}

#[tokio::test]
async fn test_depth_one_visits_only_seed() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body>seed <a href="/next">next</a></body></html>"#,
        1,
    )
    .await;
    mount_page(&server, "/next", "<html><body>hidden</body></html>", 0).await;

    let request = CrawlRequest::new([seed(&server)]).with_max_depth(1);
    let report = engine().crawl(&request).await.expect("Crawl failed");

    assert_eq!(report.urls_visited, 1);
    assert!(report.word_counts.iter().all(|(word, _)| word != "hidden"));
}

#[tokio::test]
async fn test_excluded_urls_are_never_fetched() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body>public <a href="/private/page">secret</a></body></html>"#,
        1,
    )
    .await;
    mount_page(&server, "/private/page", "<html><body>classified</body></html>", 0).await;

    let ignored = ExclusionList::new([format!("{}/private/.*", regex::escape(&server.uri()))])
        .expect("Invalid pattern");
    let request = CrawlRequest::new([seed(&server)])
        .with_max_depth(5)
        .with_ignored_urls(ignored);
    let report = engine().crawl(&request).await.expect("Crawl failed");

    assert_eq!(report.urls_visited, 1);
}

#[tokio::test]
async fn test_ignored_words_are_not_counted() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        "<html><body>the cat and the hat</body></html>",
        1,
    )
    .await;

    let config = ParserConfig {
        ignored_words: vec!["^.{1,3}$".to_string()],
        ..ParserConfig::default()
    };
    let request = CrawlRequest::new([seed(&server)]);
    let report = engine_with(&config)
        .crawl(&request)
        .await
        .expect("Crawl failed");

    assert!(report.word_counts.is_empty());
    assert_eq!(report.urls_visited, 1);
}

#[tokio::test]
async fn test_missing_page_is_skipped() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body>start <a href="/missing">gone</a></body></html>"#,
        1,
    )
    .await;

    let request = CrawlRequest::new([seed(&server)]).with_max_depth(2);
    let report = engine().crawl(&request).await.expect("Crawl failed");

    // The failed page still counts as visited
    assert_eq!(report.urls_visited, 2);
    assert_eq!(report.word_counts.len(), 2);
}

#[tokio::test]
async fn test_missing_page_aborts_when_configured() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body>start <a href="/missing">gone</a></body></html>"#,
        1,
    )
    .await;

    let request = CrawlRequest::new([seed(&server)])
        .with_max_depth(2)
        .with_parse_failure_policy(ParseFailurePolicy::Abort);
    let result = engine().crawl(&request).await;

    match result {
        Err(CrawlError::Parse { url, .. }) => assert!(url.ends_with("/missing")),
        other => panic!("Expected a parse error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_html_page_has_no_words() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body>index <a href="/doc.pdf">doc</a></body></html>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/doc.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"pdf words".to_vec(), "application/pdf"))
        .expect(1)
        .mount(&server)
        .await;

    let request = CrawlRequest::new([seed(&server)]).with_max_depth(2);
    let report = engine().crawl(&request).await.expect("Crawl failed");

    assert_eq!(report.urls_visited, 2);
    assert!(report.word_counts.iter().all(|(word, _)| word != "pdf"));
}

#[tokio::test]
async fn test_config_file_to_json_report() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let temp_dir = TempDir::new().unwrap();
    let result_path = temp_dir.path().join("result.json");

    let mut config_file = NamedTempFile::new().unwrap();
    write!(
        config_file,
        r#"
[crawler]
start-pages = ["{}/"]
max-depth = 3
timeout-seconds = 30
popular-word-count = 3
parallelism = 2

[output]
result-path = "{}"
"#,
        server.uri(),
        result_path.display()
    )
    .unwrap();
    config_file.flush().unwrap();

    let config = load_config(config_file.path()).expect("Failed to load config");
    let request = CrawlRequest::from_config(&config.crawler).expect("Invalid request");
    let engine = engine_with(&config.parser);
    let report = engine.crawl(&request).await.expect("Crawl failed");

    write_report(&report, config.output.result_path()).expect("Failed to write report");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&result_path).unwrap()).unwrap();
    assert_eq!(json["urlsVisited"], 3);
    assert_eq!(json["wordCounts"]["alpha"], 3);
    assert_eq!(json["wordCounts"]["one"], 2);
    assert_eq!(json["wordCounts"]["gamma"], 1);
    assert_eq!(json["wordCounts"].as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn test_profiled_crawl_writes_timings() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let profiler = Profiler::new();
    let crawler = profiler
        .wrap("CrawlEngine", engine(), &Operation::ALL)
        .expect("Failed to wrap engine");

    assert_eq!(crawler.max_parallelism(), crawler.inner().max_parallelism());

    let request = CrawlRequest::new([seed(&server)]).with_max_depth(3);
    let report = crawler.crawl(&request).await.expect("Crawl failed");
    assert_eq!(report.urls_visited, 3);

    let temp_dir = TempDir::new().unwrap();
    let profile_path = temp_dir.path().join("profile.txt");
    profiler.write_data(Some(&profile_path)).unwrap();

    let profile = std::fs::read_to_string(&profile_path).unwrap();
    assert!(profile.starts_with("=== Profiling Session: CrawlEngine ===\n"));
    assert!(profile.contains("CrawlEngine#crawl took "));
    assert!(profile.contains("CrawlEngine#max_parallelism took "));
}
