//! Coercion of free-form tech-stack advice into a clean list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_TECH_STACK: &[&str] = &[
    "React + Vite + TypeScript + Tailwind",
    "FastAPI (Python)",
    "PostgreSQL",
    "Auth: JWT",
    "Docker + AWS/Azure",
    "GenAI: Gemini API",
];

/// Technology names that mark a line of prose as a recommendation
const TECH_VOCABULARY: &[&str] = &[
    "react", "next.js", "vue", "angular", "fastapi", "django", "flask", "node", "express",
    "postgres", "mysql", "mongodb", "tailwind", "docker", "kubernetes", "aws", "azure", "gcp",
    "gemini", "openai",
];

const BULLET_CHARS: &[char] = &['-', ' ', '*', '\t'];

/// Where a suggestion came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    Advisor,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStackSuggestion {
    pub tech_stack: Vec<String>,
    pub source: SuggestionSource,
}

impl TechStackSuggestion {
    pub fn fallback() -> Self {
        Self {
            tech_stack: default_tech_stack(),
            source: SuggestionSource::Fallback,
        }
    }
}

pub fn default_tech_stack() -> Vec<String> {
    DEFAULT_TECH_STACK.iter().map(|s| s.to_string()).collect()
}

/// Turn an advisor reply into a suggestion. Never fails; falls back to the default list.
pub fn coerce_tech_stack(reply: &str) -> TechStackSuggestion {
    let entries = from_json(reply).unwrap_or_else(|| from_lines(reply));

    if entries.is_empty() {
        TechStackSuggestion::fallback()
    } else {
        TechStackSuggestion {
            tech_stack: entries,
            source: SuggestionSource::Advisor,
        }
    }
}

/// `{"tech_stack": [...]}` taken verbatim. `None` when the reply is not such an object.
fn from_json(reply: &str) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(reply.trim()).ok()?;
    let object = value.as_object()?;
    let Some(Value::Array(items)) = object.get("tech_stack") else {
        // An object without a usable list is still JSON, so prose scanning is skipped
        return Some(Vec::new());
    };

    Some(
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

fn from_lines(reply: &str) -> Vec<String> {
    let mut stack: Vec<String> = Vec::new();
    for line in reply.lines() {
        let clean = line.trim_matches(BULLET_CHARS);
        let lower = clean.to_lowercase();
        if TECH_VOCABULARY.iter().any(|tech| lower.contains(tech))
            && !stack.iter().any(|seen| seen == clean)
        {
            stack.push(clean.to_string());
        }
    }
    stack
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_reply_is_taken_verbatim() {
        let reply = r#"{"tech_stack": ["Next.js", "Rust (axum)", "PostgreSQL"]}"#;
        let suggestion = coerce_tech_stack(reply);
        assert_eq!(suggestion.source, SuggestionSource::Advisor);
        assert_eq!(suggestion.tech_stack, vec!["Next.js", "Rust (axum)", "PostgreSQL"]);
    }

    #[test]
    fn test_bulleted_prose_is_filtered_and_deduplicated() {
        let reply = "Here is my advice:\n\
                     - React with Tailwind\n\
                     * FastAPI backend\n\
                     - Use good naming\n\
                     \t- React with Tailwind\n\
                     - Deploy on AWS -";
        let suggestion = coerce_tech_stack(reply);
        assert_eq!(
            suggestion.tech_stack,
            vec!["React with Tailwind", "FastAPI backend", "Deploy on AWS"]
        );
        assert_eq!(suggestion.source, SuggestionSource::Advisor);
    }

    #[test]
    fn test_nothing_recognized_falls_back() {
        let suggestion = coerce_tech_stack("I cannot help with that.");
        assert_eq!(suggestion, TechStackSuggestion::fallback());
        assert_eq!(suggestion.tech_stack.len(), DEFAULT_TECH_STACK.len());
    }

    #[test]
    fn test_json_without_list_falls_back() {
        assert_eq!(coerce_tech_stack(r#"{"advice": "use react"}"#), TechStackSuggestion::fallback());
        assert_eq!(coerce_tech_stack(r#"{"tech_stack": []}"#), TechStackSuggestion::fallback());
    }

    #[test]
    fn test_non_string_items_are_rendered() {
        let suggestion = coerce_tech_stack(r#"{"tech_stack": ["Vue", 3]}"#);
        assert_eq!(suggestion.tech_stack, vec!["Vue", "3"]);
    }

    #[test]
    fn test_empty_reply() {
        assert_eq!(coerce_tech_stack(""), TechStackSuggestion::fallback());
    }
}
