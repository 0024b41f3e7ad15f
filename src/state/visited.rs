use dashmap::DashSet;

/// Set of URLs claimed during one crawl
///
/// A URL enters the registry at most once. The caller whose
/// [`try_claim`](VisitedRegistry::try_claim) succeeds owns the processing of
/// that URL; every other caller, concurrent or later, is told to skip it.
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    urls: DashSet<String>,
}

impl VisitedRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to claim a URL
    ///
    /// # Returns
    ///
    /// * `true` - This caller is the first to claim the URL
    /// * `false` - The URL was already claimed
    pub fn try_claim(&self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }

        // Insert is atomic per shard; a racing claim between the check above
        // and here still sees exactly one winner.
        self.urls.insert(url.to_string())
    }

    /// Returns whether the URL has been claimed
    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Number of distinct claimed URLs
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
