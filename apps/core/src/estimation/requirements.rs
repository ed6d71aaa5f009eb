//! Requirement extraction from modal-verb clauses.
//!
//! Every "shall / must / should / will / can / may ... ." clause becomes one
//! [`Requirement`]. Complexity tiers are scanned Low → Medium → High and the last tier
//! with a keyword hit wins, so a High keyword overrides Medium and Low ones.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static REQUIREMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:shall|must|should|will|can|may)\s+([^.]+\.)")
        .expect("requirement pattern is a valid regex")
});

/// Complexity tier of a requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Complexity::Low => "Low",
            Complexity::Medium => "Medium",
            Complexity::High => "High",
        };
        write!(f, "{}", label)
    }
}

/// Tier keyword table, in scan order
const COMPLEXITY_TIERS: &[(Complexity, &[&str])] = &[
    (Complexity::Low, &["simple", "basic", "view", "list", "read"]),
    (
        Complexity::Medium,
        &["edit", "update", "search", "filter", "access", "manage"],
    ),
    (
        Complexity::High,
        &[
            "integrate",
            "sync",
            "real-time",
            "security",
            "payment",
            "predict",
            "analyze",
        ],
    ),
];

/// A functional requirement lifted from the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Clause text after the modal verb, including the closing period
    pub text: String,
    pub complexity: Complexity,
    /// Every tier keyword found in the clause, not only the winning tier's
    pub matched_keywords: Vec<String>,
    pub word_count: usize,
}

/// Classify a clause. Returns the winning tier and all matched keywords.
pub fn classify(text: &str) -> (Complexity, Vec<String>) {
    let lower = text.to_lowercase();
    let mut complexity = Complexity::Low;
    let mut matched = Vec::new();

    for (tier, keywords) in COMPLEXITY_TIERS {
        let mut tier_hit = false;
        for keyword in keywords.iter().filter(|kw| lower.contains(*kw)) {
            matched.push((*keyword).to_string());
            tier_hit = true;
        }
        if tier_hit {
            complexity = *tier;
        }
    }

    (complexity, matched)
}

/// Extract requirements in document order. Recurring clauses are kept as duplicates.
pub fn extract_requirements(text: &str) -> Vec<Requirement> {
    REQUIREMENT_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|clause| {
            let text = clause.as_str().trim().to_string();
            let (complexity, matched_keywords) = classify(&text);
            Requirement {
                word_count: text.split_whitespace().count(),
                text,
                complexity,
                matched_keywords,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_requirements_with_last_tier_winning() {
        let text = "The system shall allow users to submit orders. It must encrypt all payment data.";
        let reqs = extract_requirements(text);

        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].text, "allow users to submit orders.");
        assert_eq!(reqs[0].complexity, Complexity::Low);
        assert!(reqs[0].matched_keywords.is_empty());
        assert_eq!(reqs[0].word_count, 5);

        assert_eq!(reqs[1].text, "encrypt all payment data.");
        assert_eq!(reqs[1].complexity, Complexity::High);
        assert_eq!(reqs[1].matched_keywords, vec!["payment"]);
    }

    #[test]
    fn test_matched_keywords_cover_all_tiers() {
        let (complexity, matched) = classify("view and update the list, then sync with billing");
        assert_eq!(complexity, Complexity::High);
        assert_eq!(matched, vec!["view", "list", "update", "sync"]);
    }

    #[test]
    fn test_medium_overrides_low() {
        let (complexity, _) = classify("Users can search a simple list");
        assert_eq!(complexity, Complexity::Medium);
    }

    #[test]
    fn test_modal_is_case_insensitive() {
        let reqs = extract_requirements("Admins MUST manage accounts. Reports Should list totals.");
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].complexity, Complexity::Medium);
        assert_eq!(reqs[1].complexity, Complexity::Low);
    }

    #[test]
    fn test_clause_without_period_is_ignored() {
        assert!(extract_requirements("The system shall be fast").is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let reqs = extract_requirements("It shall log in. It shall log in.");
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0], reqs[1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_requirements("").is_empty());
        assert!(extract_requirements("No modal verbs here.").is_empty());
    }
}
