//! In-memory lookup engine.

use std::cmp::Ordering;

use log::trace;

use super::types::models::Dictionary;

/// Bounds applied to suggestion requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestLimits {
    /// Used when the caller asks for zero or a negative number of suggestions.
    pub default: usize,
    /// Requests above this are capped.
    pub max: usize,
}

impl Default for SuggestLimits {
    fn default() -> Self {
        Self { default: 20, max: 100 }
    }
}

impl SuggestLimits {
    /// Resolves a requested limit into the number of suggestions to return.
    pub fn resolve(&self, requested: i64) -> usize {
        if requested <= 0 {
            self.default.min(self.max)
        } else {
            usize::try_from(requested).unwrap_or(usize::MAX).min(self.max)
        }
    }
}

/// Exact lookups and case-insensitive prefix suggestions over a [`Dictionary`].
///
/// The suggestion index holds every word sorted by `(lowercase, original)`,
/// so a prefix match is a binary search followed by a forward scan.
#[derive(Debug)]
pub struct DictionaryService {
    dict: Dictionary,
    sorted_words: Vec<(String, String)>,
    limits: SuggestLimits,
}

impl DictionaryService {
    pub fn new(dict: Dictionary) -> Self {
        Self::with_limits(dict, SuggestLimits::default())
    }

    pub fn with_limits(dict: Dictionary, limits: SuggestLimits) -> Self {
        let mut sorted_words: Vec<(String, String)> =
            dict.keys().map(|word| (word.to_lowercase(), word.clone())).collect();
        sorted_words.sort_unstable();
        Self {
            dict,
            sorted_words,
            limits,
        }
    }

    /// Meanings of `word`, matched exactly.
    pub fn lookup(&self, word: &str) -> Option<&[String]> {
        self.dict.get(word).map(Vec::as_slice)
    }

    pub fn exists(&self, word: &str) -> bool {
        self.dict.contains_key(word)
    }

    /// Total number of words.
    pub fn count(&self) -> usize {
        self.dict.len()
    }

    pub fn limits(&self) -> SuggestLimits {
        self.limits
    }

    /// Words starting with `prefix`, compared case-insensitively.
    ///
    /// `limit <= 0` selects the default limit; larger limits are capped.
    /// An empty prefix yields no suggestions.
    pub fn suggest(&self, prefix: &str, limit: i64) -> Vec<String> {
        let limit = self.limits.resolve(limit);
        let prefix = prefix.to_lowercase();
        if prefix.is_empty() {
            return Vec::new();
        }

        let start = self
            .sorted_words
            .partition_point(|(lower, _)| lower.as_str().cmp(prefix.as_str()) == Ordering::Less);

        let suggestions: Vec<String> = self.sorted_words[start..]
            .iter()
            .take_while(|(lower, _)| lower.starts_with(&prefix))
            .take(limit)
            .map(|(_, word)| word.clone())
            .collect();
        trace!("suggest({:?}, {}) -> {} words", prefix, limit, suggestions.len());
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(words: &[&str]) -> DictionaryService {
        let dict = words
            .iter()
            .map(|w| (w.to_string(), vec![format!("meaning of {}", w)]))
            .collect();
        DictionaryService::new(dict)
    }

    #[test]
    fn suggestions_ignore_case_and_keep_original_spelling() {
        let svc = service(&["Apple", "apply", "apricot", "banana", "APEX"]);
        assert_eq!(svc.suggest("AP", 10), vec!["APEX", "Apple", "apply", "apricot"]);
        assert_eq!(svc.suggest("app", 10), vec!["Apple", "apply"]);
    }

    #[test]
    fn limits_default_and_cap() {
        let words: Vec<String> = (0..150).map(|i| format!("w{:03}", i)).collect();
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let svc = service(&refs);
        assert_eq!(svc.suggest("w", 0).len(), 20);
        assert_eq!(svc.suggest("w", -3).len(), 20);
        assert_eq!(svc.suggest("w", 5).len(), 5);
        assert_eq!(svc.suggest("w", 1000).len(), 100);
    }

    #[test]
    fn empty_or_unmatched_prefix_yields_nothing() {
        let svc = service(&["cat", "dog"]);
        assert!(svc.suggest("", 10).is_empty());
        assert!(svc.suggest("zebra", 10).is_empty());
        assert!(svc.suggest("ca t", 10).is_empty());
    }

    #[test]
    fn lookup_is_exact() {
        let svc = service(&["Paris"]);
        assert_eq!(svc.lookup("Paris").unwrap(), ["meaning of Paris".to_string()]);
        assert!(svc.lookup("paris").is_none());
        assert!(svc.exists("Paris"));
        assert_eq!(svc.count(), 1);
    }
}
