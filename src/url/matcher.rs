use crate::ConfigError;
use regex::Regex;

/// A compiled list of patterns matched against whole strings
///
/// Each pattern is a regular expression that must match the *entire*
/// candidate, not a substring of it: `https://example\.com/.*` excludes every
/// page on the site, while `example` excludes nothing but the literal string
/// "example".
#[derive(Debug, Clone, Default)]
pub struct ExclusionList {
    patterns: Vec<Regex>,
}

impl ExclusionList {
    /// Compiles a list of pattern strings
    ///
    /// # Arguments
    ///
    /// * `patterns` - Regular expressions, without anchors
    ///
    /// # Returns
    ///
    /// * `Ok(ExclusionList)` - All patterns compiled
    /// * `Err(ConfigError::InvalidPattern)` - The first pattern that failed to compile
    ///
    /// # Examples
    ///
    /// ```
    /// use word_crawler::url::ExclusionList;
    ///
    /// let list = ExclusionList::new(["https://example\\.com/private/.*"]).unwrap();
    /// assert!(list.is_excluded("https://example.com/private/page"));
    /// assert!(!list.is_excluded("https://example.com/public"));
    /// ```
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
                    ConfigError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if any pattern matches the entire candidate
    pub fn is_excluded(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(candidate))
    }

    /// Number of compiled patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_match() {
        let list = ExclusionList::new(["https://example\\.com/a"]).unwrap();
        assert!(list.is_excluded("https://example.com/a"));
    }

    #[test]
    fn test_substring_does_not_match() {
        let list = ExclusionList::new(["example"]).unwrap();
        assert!(!list.is_excluded("https://example.com/"));
        assert!(list.is_excluded("example"));
    }

    #[test]
    fn test_wildcard_suffix() {
        let list = ExclusionList::new(["https://example\\.com/private/.*"]).unwrap();
        assert!(list.is_excluded("https://example.com/private/"));
        assert!(list.is_excluded("https://example.com/private/deep/page"));
        assert!(!list.is_excluded("https://example.com/privateer"));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        // Without grouping, "a|b" anchored naively would become "^a|b$"
        let list = ExclusionList::new(["a|b"]).unwrap();
        assert!(list.is_excluded("a"));
        assert!(list.is_excluded("b"));
        assert!(!list.is_excluded("ab"));
        assert!(!list.is_excluded("xb"));
    }

    #[test]
    fn test_any_pattern_matches() {
        let list = ExclusionList::new(["https://a\\.com/.*", "https://b\\.com/.*"]).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.is_excluded("https://b.com/x"));
        assert!(!list.is_excluded("https://c.com/x"));
    }

    #[test]
    fn test_empty_list_excludes_nothing() {
        let list = ExclusionList::default();
        assert!(list.is_empty());
        assert!(!list.is_excluded("https://example.com/"));
        assert!(!list.is_excluded(""));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = ExclusionList::new(["ok", "(unclosed"]).unwrap_err();
        match err {
            ConfigError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_case_sensitivity() {
        let list = ExclusionList::new(["https://example\\.com/"]).unwrap();
        assert!(!list.is_excluded("HTTPS://EXAMPLE.COM/"));
    }
}
