use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Accumulated elapsed time per `component#operation`
///
/// Shared by every wrapper a profiler hands out. Entries are kept sorted so
/// the written report is stable between runs.
#[derive(Debug, Default)]
pub(crate) struct ProfilingState {
    data: Mutex<BTreeMap<String, Duration>>,
}

impl ProfilingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `elapsed` to the running total for the operation
    pub fn record(&self, component: &str, operation: &str, elapsed: Duration) {
        let key = format_key(component, operation);
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        *data.entry(key).or_insert(Duration::ZERO) += elapsed;
    }

    /// Total time recorded for the operation, if it ever ran
    pub fn total(&self, component: &str, operation: &str) -> Option<Duration> {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.get(&format_key(component, operation)).copied()
    }

    /// Writes one line per entry
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        for (key, elapsed) in data.iter() {
            writeln!(writer, "{} took {}", key, format_duration(*elapsed))?;
        }
        Ok(())
    }
}

fn format_key(component: &str, operation: &str) -> String {
    format!("{}#{}", component, operation)
}

/// Formats a duration as `<m>m <s>s <ms>ms`
fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{}m {}s {}ms",
        secs / 60,
        secs % 60,
        elapsed.subsec_millis()
    )
}
