//! Shared crawl state
//!
//! The only mutable state shared between crawl tasks lives here. Both
//! structures are safe to mutate concurrently through a shared reference; crawl
//! tasks never wrap them in an outer lock.
//!
//! # Components
//!
//! - `VisitedRegistry`: URLs already claimed by a task, first claim wins
//! - `WordCountAggregator`: running word totals merged from every processed page

mod visited;
mod word_counts;

pub use visited::VisitedRegistry;
pub use word_counts::WordCountAggregator;
