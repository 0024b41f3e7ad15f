//! Recursive crawl task
//!
//! Each task owns one URL. It decides whether the URL should be processed,
//! parses it, merges the page's word counts and then forks one child task per
//! outbound link, joining all of them before it completes. Children run as
//! separate tokio tasks, so the depth of the link graph never translates into
//! call-stack depth.

use crate::config::ParseFailurePolicy;
use crate::crawler::page::{PageParseResult, PageParser};
use crate::crawler::request::Deadline;
use crate::state::{VisitedRegistry, WordCountAggregator};
use crate::url::ExclusionList;
use crate::CrawlError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Boxed future returned by [`CrawlTask::run`]
pub(crate) type TaskFuture = Pin<Box<dyn Future<Output = Result<TaskOutcome, CrawlError>> + Send>>;

/// State shared by every task of one crawl
pub(crate) struct CrawlContext {
    pub parser: Arc<dyn PageParser>,
    pub deadline: Deadline,
    pub ignored_urls: ExclusionList,
    pub on_parse_failure: ParseFailurePolicy,
    pub visited: VisitedRegistry,
    pub word_counts: WordCountAggregator,

    /// Bounds the number of page parses in flight
    pub permits: Semaphore,
}

/// How a task finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TaskOutcome {
    DepthExhausted,
    DeadlinePassed,
    Excluded,
    AlreadyVisited,
    Processed { links: usize },
}

/// One URL's unit of work
pub(crate) struct CrawlTask {
    url: String,
    depth_remaining: u32,
    context: Arc<CrawlContext>,
}

impl CrawlTask {
    pub fn new(url: String, depth_remaining: u32, context: Arc<CrawlContext>) -> Self {
        Self {
            url,
            depth_remaining,
            context,
        }
    }

    /// Runs this task and, transitively, its whole subtree
    ///
    /// The checks run in a fixed order: depth, deadline, exclusion, then the
    /// visited claim. Excluded URLs therefore never occupy a slot in the
    /// visited registry.
    pub fn run(self) -> TaskFuture {
        Box::pin(async move {
            let context = &self.context;

            if self.depth_remaining == 0 {
                return Ok(TaskOutcome::DepthExhausted);
            }

            if context.deadline.has_passed() {
                tracing::debug!("Deadline passed, skipping {}", self.url);
                return Ok(TaskOutcome::DeadlinePassed);
            }

            if context.ignored_urls.is_excluded(&self.url) {
                tracing::debug!("Skipping excluded URL {}", self.url);
                return Ok(TaskOutcome::Excluded);
            }

            if !context.visited.try_claim(&self.url) {
                return Ok(TaskOutcome::AlreadyVisited);
            }

            tracing::debug!(
                "Processing URL: {} (depth remaining {})",
                self.url,
                self.depth_remaining
            );

            let parsed = {
                let _permit = context
                    .permits
                    .acquire()
                    .await
                    .map_err(|_| CrawlError::Pool("worker pool is closed".to_string()))?;
                context.parser.parse(&self.url).await
            };

            let page = match parsed {
                Ok(page) => page,
                Err(source) => match context.on_parse_failure {
                    ParseFailurePolicy::Skip => {
                        tracing::warn!("Failed to parse {}: {}", self.url, source);
                        PageParseResult::empty()
                    }
                    ParseFailurePolicy::Abort => {
                        return Err(CrawlError::Parse {
                            url: self.url,
                            source,
                        });
                    }
                },
            };

            context.word_counts.merge(&page.word_counts);

            let links = page.links.len();
            let mut children = JoinSet::new();
            for link in page.links {
                let child = CrawlTask::new(link, self.depth_remaining - 1, Arc::clone(context));
                children.spawn(child.run());
            }
            join_all(&mut children).await?;

            Ok(TaskOutcome::Processed { links })
        })
    }
}

/// Waits for every task in the set
///
/// Returns the first failure. Dropping the set on that early return aborts
/// the remaining tasks.
pub(crate) async fn join_all(
    tasks: &mut JoinSet<Result<TaskOutcome, CrawlError>>,
) -> Result<(), CrawlError> {
    while let Some(joined) = tasks.join_next().await {
        joined.map_err(|e| CrawlError::Pool(format!("crawl task did not complete: {}", e)))??;
    }
    Ok(())
}
