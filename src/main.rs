//! word-crawler main entry point
//!
//! This is the command-line interface for the word-crawler parallel word
//! frequency crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use word_crawler::config::{load_config_with_hash, Config};
use word_crawler::crawler::hardware_concurrency;
use word_crawler::output::write_report;
use word_crawler::profiler::{Operation, Profiler};
use word_crawler::{CrawlEngine, CrawlRequest, Crawler, HttpPageParser};

/// word-crawler: a parallel word frequency crawler
///
/// word-crawler follows links from a set of start pages, within a depth and
/// time budget, and reports the most popular words it found along with the
/// number of pages visited.
#[derive(Parser, Debug)]
#[command(name = "word-crawler")]
#[command(version)]
#[command(about = "A parallel word frequency crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("word_crawler=info,warn"),
            1 => EnvFilter::new("word_crawler=debug,info"),
            2 => EnvFilter::new("word_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr; stdout carries the crawl result
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config) {
    println!("=== word-crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Timeout: {}s", config.crawler.timeout_seconds);
    println!("  Popular word count: {}", config.crawler.popular_word_count);
    println!(
        "  Parallelism: {} (hardware: {})",
        config.crawler.parallelism,
        hardware_concurrency()
    );
    println!("  On parse failure: {:?}", config.crawler.on_parse_failure);

    println!("\nParser:");
    println!("  User agent: {}", config.parser.user_agent);
    println!("  Page timeout: {}s", config.parser.timeout_seconds);
    println!("  Ignored words: {}", config.parser.ignored_words.len());

    println!("\nOutput:");
    println!(
        "  Result: {}",
        config
            .output
            .result_path()
            .map_or_else(|| "stdout".to_string(), |p| p.display().to_string())
    );
    println!(
        "  Profile: {}",
        config
            .output
            .profile_path()
            .map_or_else(|| "stdout".to_string(), |p| p.display().to_string())
    );

    println!("\nStart Pages ({}):", config.crawler.start_pages.len());
    for page in &config.crawler.start_pages {
        println!("  - {}", page);
    }

    println!("\nIgnored URLs ({}):", config.crawler.ignored_urls.len());
    for pattern in &config.crawler.ignored_urls {
        println!("  - {}", pattern);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
///
/// The runtime's worker threads are sized to the engine's parallelism.
fn handle_crawl(config: Config) -> anyhow::Result<()> {
    let request = CrawlRequest::from_config(&config.crawler)?;
    let parser = HttpPageParser::new(&config.parser)?;
    let engine = CrawlEngine::new(Arc::new(parser), config.crawler.parallelism);

    let profiler = Profiler::new();
    let crawler = profiler.wrap("CrawlEngine", engine, &Operation::ALL)?;

    let workers = crawler.max_parallelism();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .thread_name("word-crawler-worker")
        .enable_all()
        .build()
        .context("Failed to build the worker pool")?;

    tracing::info!(
        "Crawling {} start pages with {} workers",
        config.crawler.start_pages.len(),
        workers
    );

    let report = match runtime.block_on(crawler.crawl(&request)) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Crawl completed: {} URLs visited, {} popular words",
        report.urls_visited,
        report.word_counts.len()
    );

    write_report(&report, config.output.result_path()).context("Failed to write crawl result")?;
    profiler
        .write_data(config.output.profile_path())
        .context("Failed to write profiling data")?;

    Ok(())
}
