use dashmap::DashMap;
use std::collections::HashMap;

/// Running word totals for one crawl
///
/// The total for each word is the exact sum of that word's per-page counts
/// over every merged page, regardless of how concurrent merges interleave.
/// Words are case-sensitive and stored as the parser produced them.
#[derive(Debug, Default)]
pub struct WordCountAggregator {
    counts: DashMap<String, u64>,
}

impl WordCountAggregator {
    /// Creates an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one page's word counts to the running totals
    ///
    /// Each word's increment happens under that word's shard lock, so
    /// concurrent merges of overlapping word sets never lose updates.
    pub fn merge(&self, word_counts: &HashMap<String, u64>) {
        for (word, &count) in word_counts {
            if let Some(mut total) = self.counts.get_mut(word.as_str()) {
                *total += count;
                continue;
            }

            *self.counts.entry(word.clone()).or_insert(0) += count;
        }
    }

    /// Returns the total for a single word, if it has been seen
    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).map(|total| *total)
    }

    /// Returns an owned copy of the current totals
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
