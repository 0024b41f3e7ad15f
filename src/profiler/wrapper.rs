use crate::crawler::{CrawlReport, CrawlRequest, Crawler};
use crate::profiler::state::ProfilingState;
use crate::profiler::Operation;
use crate::CrawlError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::time::Instant;

/// A [`Crawler`] that records how long selected operations take
///
/// Every call is delegated to the wrapped crawler unchanged. Created by
/// [`Profiler::wrap`](crate::profiler::Profiler::wrap).
pub struct ProfiledCrawler<C> {
    inner: C,
    component: String,
    operations: Vec<Operation>,
    state: Arc<ProfilingState>,
}

impl<C: Crawler> ProfiledCrawler<C> {
    pub(crate) fn new(
        inner: C,
        component: String,
        operations: Vec<Operation>,
        state: Arc<ProfilingState>,
    ) -> Self {
        Self {
            inner,
            component,
            operations,
            state,
        }
    }

    /// The wrapped crawler
    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn timer(&self, operation: Operation) -> Option<OperationTimer<'_>> {
        self.operations
            .contains(&operation)
            .then(|| OperationTimer::start(&self.state, &self.component, operation))
    }
}

#[async_trait]
impl<C: Crawler> Crawler for ProfiledCrawler<C> {
    async fn crawl(&self, request: &CrawlRequest) -> Result<CrawlReport, CrawlError> {
        let _timer = self.timer(Operation::Crawl);
        self.inner.crawl(request).await
    }

    fn max_parallelism(&self) -> usize {
        let _timer = self.timer(Operation::MaxParallelism);
        self.inner.max_parallelism()
    }
}

/// Records the time since it was started when dropped
///
/// Dropping on every exit path means failed and panicking calls are timed too.
struct OperationTimer<'a> {
    state: &'a ProfilingState,
    component: &'a str,
    operation: Operation,
    started: Instant,
}

impl<'a> OperationTimer<'a> {
    fn start(state: &'a ProfilingState, component: &'a str, operation: Operation) -> Self {
        Self {
            state,
            component,
            operation,
            started: Instant::now(),
        }
    }
}

impl Drop for OperationTimer<'_> {
    fn drop(&mut self) {
        self.state.record(
            self.component,
            self.operation.name(),
            self.started.elapsed(),
        );
    }
}
