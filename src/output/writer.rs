//! JSON report writer
//!
//! Reports are written as
//! `{"wordCounts": {<word>: <count>, ...}, "urlsVisited": <n>}` with word
//! counts in rank order.

use crate::crawler::CrawlReport;
use crate::CrawlError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a crawl report to a file, or to stdout when no path is given
///
/// An existing file at `path` is truncated.
///
/// # Arguments
///
/// * `report` - The report to write
/// * `path` - Destination file, or `None` for stdout
pub fn write_report(report: &CrawlReport, path: Option<&Path>) -> Result<(), CrawlError> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            write_report_to(report, BufWriter::new(file))?;
            tracing::info!("Wrote crawl results to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_report_to(report, stdout.lock())?;
        }
    }

    Ok(())
}

/// Writes a crawl report to any writer and flushes it
pub fn write_report_to<W: Write>(report: &CrawlReport, mut writer: W) -> Result<(), CrawlError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
