//! Crawl engine - top-level crawl orchestration
//!
//! The engine validates a request, creates the per-crawl shared state, launches
//! one root task per seed URL and waits for every task tree to settle before
//! assembling the report.

use crate::crawler::page::PageParser;
use crate::crawler::request::{CrawlReport, CrawlRequest, Deadline};
use crate::crawler::task::{CrawlContext, CrawlTask, TaskOutcome};
use crate::crawler::Crawler;
use crate::output::{rank, RankedWords};
use crate::state::{VisitedRegistry, WordCountAggregator};
use crate::CrawlError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;

/// Number of hardware threads available to this process
pub fn hardware_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Parallel crawl engine
///
/// The engine's parallelism is fixed at construction: the requested worker
/// count capped by the hardware concurrency.
pub struct CrawlEngine {
    parser: Arc<dyn PageParser>,
    max_parallelism: usize,
}

impl CrawlEngine {
    /// Creates a new engine
    ///
    /// # Arguments
    ///
    /// * `parser` - Page parser shared by every crawl task
    /// * `parallelism` - Requested number of parallel workers
    pub fn new(parser: Arc<dyn PageParser>, parallelism: usize) -> Self {
        Self::with_hardware_limit(parser, parallelism, hardware_concurrency())
    }

    /// Creates an engine against an explicit hardware concurrency
    pub fn with_hardware_limit(
        parser: Arc<dyn PageParser>,
        parallelism: usize,
        hardware_concurrency: usize,
    ) -> Self {
        Self {
            parser,
            max_parallelism: parallelism.min(hardware_concurrency).max(1),
        }
    }
}

#[async_trait]
impl Crawler for CrawlEngine {
    /// Runs a complete crawl
    ///
    /// 1. Validate the request
    /// 2. Fix the deadline and create the visited registry and word totals
    /// 3. Launch one root task per seed, in request order
    /// 4. Wait for every task tree to settle
    /// 5. Rank the merged word counts
    async fn crawl(&self, request: &CrawlRequest) -> Result<CrawlReport, CrawlError> {
        request.validate()?;

        let start_time = Instant::now();
        let workers = self.max_parallelism.min(request.parallelism);

        tracing::info!(
            "Starting crawl of {} seed URLs (max depth {}, {} workers)",
            request.start_pages.len(),
            request.max_depth,
            workers
        );

        let context = Arc::new(CrawlContext {
            parser: Arc::clone(&self.parser),
            deadline: Deadline::after(request.timeout),
            ignored_urls: request.ignored_urls.clone(),
            on_parse_failure: request.on_parse_failure,
            visited: VisitedRegistry::new(),
            word_counts: WordCountAggregator::new(),
            permits: Semaphore::new(workers),
        });

        let mut roots = JoinSet::new();
        for seed in &request.start_pages {
            let task = CrawlTask::new(seed.clone(), request.max_depth, Arc::clone(&context));
            roots.spawn(task.run());
        }

        while let Some(joined) = roots.join_next().await {
            let outcome = joined
                .map_err(|e| CrawlError::Pool(format!("crawl task did not complete: {}", e)))??;

            match outcome {
                TaskOutcome::Processed { links } => {
                    tracing::debug!("Seed task finished after following {} links", links)
                }
                skipped => tracing::debug!("Seed task skipped: {:?}", skipped),
            }
        }

        let urls_visited = context.visited.len();
        let word_counts = if context.word_counts.is_empty() {
            RankedWords::new()
        } else {
            rank(&context.word_counts.snapshot(), request.popular_word_count)
        };

        tracing::info!(
            "Crawl completed: {} URLs visited, {} distinct words in {:?}",
            urls_visited,
            context.word_counts.len(),
            start_time.elapsed()
        );

        Ok(CrawlReport {
            word_counts,
            urls_visited,
        })
    }

    fn max_parallelism(&self) -> usize {
        self.max_parallelism
    }
}
