//! Tokenizer and keyword frequency ranking.
//!
//! Tokens are runs of letters, digits, `_` and `-` that start with a letter, lower-cased.
//! Keyword ranking drops stopwords and tokens shorter than three characters, then orders
//! the remaining tokens by frequency. Ties keep the order of first appearance, so the
//! ranking is fully deterministic.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::entities::{Entity, EntityCapability};

/// Number of keywords reported in a document profile unless configured otherwise
pub const DEFAULT_PROFILE_KEYWORDS: usize = 12;

/// Minimal English stopword set, kept in-process to avoid runtime downloads
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "then", "else", "for", "while", "of", "in",
    "on", "at", "by", "with", "to", "from", "is", "are", "was", "were", "be", "been", "being",
    "do", "does", "did", "not", "no", "nor", "so", "than", "too", "very", "can", "will",
    "just", "into", "over", "under", "between", "out", "up", "down", "off", "again",
    "further", "once", "here", "there", "when", "where", "why", "how", "all", "any", "both",
    "each", "few", "more", "most", "other", "some", "such", "only", "own", "same", "s", "o",
    "t", "don", "should", "now", "you", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we",
    "us", "our", "ours", "ourselves", "they", "them", "their", "theirs", "themselves", "i",
    "me", "my", "mine", "myself", "this", "that", "these", "those", "as", "until", "about",
    "against", "during", "before", "after", "above", "below", "having", "have", "has", "had",
    "doing",
];

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z][A-Za-z0-9_\-]+").expect("token pattern is a valid regex")
});

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Split text into lower-cased tokens, in document order
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Whether the token is in the built-in stopword list
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Keyword summary of a whole document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordProfile {
    /// Number of tokens in the document
    pub word_count: usize,
    /// Most frequent non-stopword tokens, most frequent first
    pub top_keywords: Vec<String>,
    /// Named entities, empty when no recognizer is available
    pub entities: Vec<Entity>,
}

/// Frequency-based keyword analyzer
#[derive(Debug, Clone)]
pub struct KeywordAnalyzer {
    min_word_length: usize,
    max_keywords: usize,
}

impl Default for KeywordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordAnalyzer {
    /// Create an analyzer reporting the default number of keywords
    pub fn new() -> Self {
        Self::with_config(3, DEFAULT_PROFILE_KEYWORDS)
    }

    /// Create an analyzer with a custom minimum token length and keyword budget
    pub fn with_config(min_word_length: usize, max_keywords: usize) -> Self {
        Self {
            min_word_length,
            max_keywords,
        }
    }

    fn is_candidate(&self, token: &str) -> bool {
        token.chars().count() >= self.min_word_length && !is_stopword(token)
    }

    /// Rank the top `top_k` keywords (or the configured budget when `None`)
    pub fn top_keywords(&self, text: &str, top_k: Option<usize>) -> Vec<String> {
        let limit = top_k.unwrap_or(self.max_keywords);

        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut first_seen: Vec<String> = Vec::new();
        for token in tokenize(text).into_iter().filter(|t| self.is_candidate(t)) {
            let count = counts.entry(token.clone()).or_insert(0);
            if *count == 0 {
                first_seen.push(token);
            }
            *count += 1;
        }

        // Stable sort keeps first-appearance order among equal counts
        first_seen.sort_by(|a, b| counts[b].cmp(&counts[a]));
        first_seen.truncate(limit);
        first_seen
    }

    /// Build the document profile: token count, top keywords and entities
    pub fn profile(&self, text: &str, recognizer: &EntityCapability) -> KeywordProfile {
        KeywordProfile {
            word_count: tokenize(text).len(),
            top_keywords: self.top_keywords(text, None),
            entities: recognizer.extract(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_keeps_inner_punctuation() {
        let tokens = tokenize("Real-time SYNC of user_data, v2 and 42 items.");
        assert_eq!(
            tokens,
            vec!["real-time", "sync", "of", "user_data", "v2", "and", "items"]
        );
    }

    #[test]
    fn test_single_letters_are_not_tokens() {
        assert!(tokenize("a b c 1 2 3").is_empty());
    }

    #[test]
    fn test_ranking_by_frequency_then_first_appearance() {
        let analyzer = KeywordAnalyzer::new();
        let text = "report export report payment export report invoice";
        let keywords = analyzer.top_keywords(text, Some(10));
        assert_eq!(keywords, vec!["report", "export", "payment", "invoice"]);
    }

    #[test]
    fn test_ties_keep_document_order() {
        let analyzer = KeywordAnalyzer::new();
        let keywords = analyzer.top_keywords("zeta alpha beta zeta alpha beta", Some(3));
        assert_eq!(keywords, vec!["zeta", "alpha", "beta"]);

        let keywords = analyzer.top_keywords("beta zeta alpha alpha zeta beta", Some(2));
        assert_eq!(keywords, vec!["beta", "zeta"]);
    }

    #[test]
    fn test_stopwords_and_short_tokens_filtered() {
        let analyzer = KeywordAnalyzer::new();
        let keywords = analyzer.top_keywords("the system should be up to date on it", None);
        assert_eq!(keywords, vec!["system", "date"]);
        for keyword in &keywords {
            assert!(!is_stopword(keyword));
            assert!(keyword.len() >= 3);
        }
    }

    #[test]
    fn test_limit_is_respected() {
        let analyzer = KeywordAnalyzer::with_config(3, 2);
        let keywords = analyzer.top_keywords("alpha beta gamma delta", None);
        assert_eq!(keywords.len(), 2);
    }

    #[test]
    fn test_empty_text() {
        let analyzer = KeywordAnalyzer::new();
        assert!(analyzer.top_keywords("", None).is_empty());
        assert!(analyzer.top_keywords("   ", Some(5)).is_empty());
    }

    #[test]
    fn test_profile_without_recognizer() {
        let analyzer = KeywordAnalyzer::new();
        let profile = analyzer.profile(
            "Orders must be stored. Orders may be exported.",
            &EntityCapability::Unavailable,
        );
        assert_eq!(profile.word_count, 8);
        assert_eq!(profile.top_keywords[0], "orders");
        assert!(profile.entities.is_empty());
    }
}
