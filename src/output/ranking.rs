//! Popular-word ranking
//!
//! Word counts are ordered by:
//! 1. Count, most frequent first
//! 2. Word length in characters, longest first
//! 3. The word itself, ascending
//!
//! Word keys are unique, so the order is total and ranking is a pure function
//! of its input.

use serde::ser::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;

/// An ordered, limited word count table
///
/// Serializes as a JSON object whose keys appear in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedWords(Vec<(String, u64)>);

impl RankedWords {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in rank order
    pub fn entries(&self) -> &[(String, u64)] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(word, count)| (word.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<(String, u64)> {
        self.0
    }
}

impl Serialize for RankedWords {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(word, count)| (word, count)))
    }
}

/// Compares two (word, count) entries in rank order
///
/// `Ordering::Less` means `a` ranks above `b`.
pub fn compare_word_counts(a: (&str, u64), b: (&str, u64)) -> Ordering {
    b.1.cmp(&a.1)
        .then_with(|| b.0.chars().count().cmp(&a.0.chars().count()))
        .then_with(|| a.0.cmp(b.0))
}

/// Ranks word counts and keeps the top `limit` entries
///
/// # Arguments
///
/// * `counts` - Unordered word totals
/// * `limit` - Maximum number of entries to return
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use word_crawler::output::rank;
///
/// let counts: HashMap<String, u64> = [("cat", 3), ("dog", 3), ("ox", 3), ("bat", 2)]
///     .into_iter()
///     .map(|(w, c)| (w.to_string(), c))
///     .collect();
///
/// let ranked = rank(&counts, 3);
/// let words: Vec<_> = ranked.iter().collect();
/// assert_eq!(words, vec![("cat", 3), ("dog", 3), ("ox", 3)]);
/// ```
pub fn rank(counts: &HashMap<String, u64>, limit: usize) -> RankedWords {
    let mut entries: Vec<(&str, u64)> = counts
        .iter()
        .map(|(word, count)| (word.as_str(), *count))
        .collect();

    entries.sort_unstable_by(|a, b| compare_word_counts(*a, *b));

    RankedWords(
        entries
            .into_iter()
            .take(limit)
            .map(|(word, count)| (word.to_string(), count))
            .collect(),
    )
}
