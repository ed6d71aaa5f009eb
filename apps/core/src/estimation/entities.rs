//! Optional named-entity recognition.
//!
//! The recognizer is a capability that may be missing. It is resolved once at start-up
//! into an [`EntityCapability`] handle and passed by reference into the pipeline; every
//! failure degrades to an empty entity list.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::{info, warn};

use crate::error::AppError;

/// Longest prefix of a document handed to a recognizer, in characters
const MAX_RECOGNIZER_INPUT: usize = 200_000;

/// A recognized entity span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

/// Anything that can find entities in text
pub trait EntityRecognizer: Send + Sync {
    fn name(&self) -> &str;

    fn recognize(&self, text: &str) -> Result<Vec<Entity>, AppError>;
}

/// Which recognizer to resolve at start-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognizerKind {
    /// Built-in pattern recognizer
    Pattern,
    /// Entity recognition switched off
    Off,
}

impl std::str::FromStr for RecognizerKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pattern" | "on" => Ok(RecognizerKind::Pattern),
            "off" | "none" | "" => Ok(RecognizerKind::Off),
            other => Err(AppError::Config(format!("Unknown entity recognizer: {}", other))),
        }
    }
}

/// Injected recognizer handle
#[derive(Default)]
pub enum EntityCapability {
    /// Not resolved yet; behaves like `Unavailable`
    #[default]
    Uninitialized,
    Ready(Box<dyn EntityRecognizer>),
    Unavailable,
}

impl fmt::Debug for EntityCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityCapability::Uninitialized => write!(f, "Uninitialized"),
            EntityCapability::Ready(r) => write!(f, "Ready({})", r.name()),
            EntityCapability::Unavailable => write!(f, "Unavailable"),
        }
    }
}

impl EntityCapability {
    /// Resolve the configured recognizer
    pub fn resolve(kind: RecognizerKind) -> Self {
        match kind {
            RecognizerKind::Pattern => {
                info!("Entity recognizer ready: pattern");
                EntityCapability::Ready(Box::new(PatternEntityRecognizer))
            }
            RecognizerKind::Off => {
                info!("Entity recognizer disabled");
                EntityCapability::Unavailable
            }
        }
    }

    pub fn with_recognizer(recognizer: Box<dyn EntityRecognizer>) -> Self {
        EntityCapability::Ready(recognizer)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, EntityCapability::Ready(_))
    }

    /// Extract entities; never fails
    pub fn extract(&self, text: &str) -> Vec<Entity> {
        let EntityCapability::Ready(recognizer) = self else {
            return Vec::new();
        };

        let input = match text.char_indices().nth(MAX_RECOGNIZER_INPUT) {
            Some((cut, _)) => &text[..cut],
            None => text,
        };

        match recognizer.recognize(input) {
            Ok(entities) => entities,
            Err(e) => {
                warn!("Entity recognizer '{}' failed: {}", recognizer.name(), e);
                Vec::new()
            }
        }
    }
}

static ENTITY_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("EMAIL", r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"),
        ("URL", r"\bhttps?://[^\s<>()]+[^\s<>().,;]"),
        (
            "MONEY",
            r"(?i)(?:[$€£₹]\s?\d[\d,]*(?:\.\d+)?(?:\s?(?:k|m|million|billion))?|\b\d[\d,]*(?:\.\d+)?\s?(?:usd|eur|inr|dollars|rupees)\b)",
        ),
        ("PERCENT", r"\b\d+(?:\.\d+)?\s?(?:%|percent\b)"),
        (
            "DATE",
            r"(?i)\b(?:\d{4}-\d{2}-\d{2}|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+\d{1,2}(?:,\s*\d{4})?|q[1-4]\s+\d{4})\b",
        ),
    ]
    .into_iter()
    .map(|(label, pattern)| {
        (
            label,
            Regex::new(pattern).expect("entity patterns are valid regexes"),
        )
    })
    .collect()
});

/// Lightweight recognizer for figures that matter in estimates: money, percentages,
/// dates, e-mail addresses and URLs
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternEntityRecognizer;

impl EntityRecognizer for PatternEntityRecognizer {
    fn name(&self) -> &str {
        "pattern"
    }

    fn recognize(&self, text: &str) -> Result<Vec<Entity>, AppError> {
        let mut found: Vec<(usize, usize, Entity)> = Vec::new();
        for (label, pattern) in ENTITY_PATTERNS.iter() {
            for m in pattern.find_iter(text) {
                // First label to claim a span keeps it (an e-mail domain is not a URL)
                let overlaps = found
                    .iter()
                    .any(|(start, end, _)| m.start() < *end && *start < m.end());
                if !overlaps {
                    found.push((
                        m.start(),
                        m.end(),
                        Entity {
                            text: m.as_str().trim().to_string(),
                            label: (*label).to_string(),
                        },
                    ));
                }
            }
        }
        found.sort_by_key(|(start, _, _)| *start);
        Ok(found.into_iter().map(|(_, _, e)| e).collect())
    }
}
