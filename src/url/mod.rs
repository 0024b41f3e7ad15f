//! URL handling module
//!
//! The crawl engine treats URLs as opaque strings. This module only provides
//! the compiled pattern lists used to exclude URLs (and, in the page parser,
//! ignored words) by full-string match.

mod matcher;

pub use matcher::ExclusionList;
