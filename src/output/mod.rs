//! Output module for crawl reports
//!
//! This module handles:
//! - Ranking merged word counts into the final popular-word table
//! - Writing crawl reports as JSON to a file or stdout

mod ranking;
mod writer;

pub use ranking::{compare_word_counts, rank, RankedWords};
pub use writer::{write_report, write_report_to};
