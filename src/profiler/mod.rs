//! Profiler module
//!
//! Wraps a [`Crawler`] so that the time spent in selected operations is
//! accumulated in a shared ledger, and writes that ledger as a plain-text
//! report:
//!
//! ```text
//! === Profiling Session: CrawlEngine ===
//! Run at Sat, 17 Oct 2026 09:30:00 +0000
//! CrawlEngine#crawl took 0m 7s 12ms
//! CrawlEngine#max_parallelism took 0m 0s 0ms
//! ```

mod state;
mod wrapper;

pub use wrapper::ProfiledCrawler;

use crate::crawler::Crawler;
use crate::ProfilerError;
use chrono::{DateTime, Utc};
use state::ProfilingState;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// A crawler operation that can be profiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Crawl,
    MaxParallelism,
}

impl Operation {
    /// Every profilable operation
    pub const ALL: [Operation; 2] = [Operation::Crawl, Operation::MaxParallelism];

    /// Name used in the profiling report
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Crawl => "crawl",
            Operation::MaxParallelism => "max_parallelism",
        }
    }
}

/// Collects timing data for wrapped crawlers
pub struct Profiler {
    state: Arc<ProfilingState>,
    started_at: DateTime<Utc>,
    session: Mutex<String>,
}

impl Profiler {
    /// Creates a profiler; the session's start time is fixed here
    pub fn new() -> Self {
        Self {
            state: Arc::new(ProfilingState::new()),
            started_at: Utc::now(),
            session: Mutex::new("Unknown".to_string()),
        }
    }

    /// Wraps `inner` so that calls to `operations` are timed
    ///
    /// The session header takes the name of the most recently wrapped
    /// component.
    ///
    /// # Errors
    ///
    /// `ProfilerError::NoProfiledOperations` if `operations` is empty.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use word_crawler::config::ParserConfig;
    /// use word_crawler::profiler::{Operation, Profiler};
    /// use word_crawler::{CrawlEngine, HttpPageParser};
    ///
    /// let parser = HttpPageParser::new(&ParserConfig::default()).unwrap();
    /// let engine = CrawlEngine::new(Arc::new(parser), 4);
    ///
    /// let profiler = Profiler::new();
    /// let crawler = profiler
    ///     .wrap("CrawlEngine", engine, &Operation::ALL)
    ///     .unwrap();
    /// ```
    pub fn wrap<C: Crawler>(
        &self,
        component: impl Into<String>,
        inner: C,
        operations: &[Operation],
    ) -> Result<ProfiledCrawler<C>, ProfilerError> {
        let component = component.into();

        if operations.is_empty() {
            return Err(ProfilerError::NoProfiledOperations { component });
        }

        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = component.clone();

        Ok(ProfiledCrawler::new(
            inner,
            component,
            operations.to_vec(),
            Arc::clone(&self.state),
        ))
    }

    /// Total time recorded for one operation of a wrapped component
    pub fn elapsed(&self, component: &str, operation: Operation) -> Option<Duration> {
        self.state.total(component, operation.name())
    }

    /// Writes the report, appending to `path` or printing to stdout
    pub fn write_data(&self, path: Option<&Path>) -> io::Result<()> {
        match path {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                let mut writer = BufWriter::new(file);
                self.write_data_to(&mut writer)?;
                writer.flush()
            }
            None => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                self.write_data_to(&mut handle)?;
                handle.flush()
            }
        }
    }

    /// Writes the report to any writer
    pub fn write_data_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let session = self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        writeln!(writer, "=== Profiling Session: {} ===", session)?;
        writeln!(writer, "Run at {}", self.started_at.to_rfc2822())?;
        self.state.write(writer)?;
        writeln!(writer)
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}
