//! Estimation Report - Output structure of the pipeline.
//!
//! One immutable snapshot per analyzed document, serializable as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cocomo::CocomoResult;
use super::cost_drivers::CostDriverResult;
use super::function_points::FunctionPointResult;
use super::keywords::{tokenize, KeywordProfile};
use super::predictor::Prediction;
use super::requirements::Requirement;
use super::tech_stack::TechStackSuggestion;
use crate::error::AppError;
use crate::models::ProjectAnalysis;

/// Document text with its token sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub tokens: Vec<String>,
}

impl Document {
    /// Wrap extracted text; blank text is an input error
    pub fn new(text: impl Into<String>) -> Result<Self, AppError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AppError::EmptyDocument);
        }
        let tokens = tokenize(&text);
        Ok(Self { text, tokens })
    }

    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }
}

/// Outcome of the optional generative project analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AiAnalysis {
    NotRequested,
    /// Requested, but no service is configured
    Unavailable,
    Completed { analysis: ProjectAnalysis },
    Failed { error: String },
}

impl AiAnalysis {
    /// Requested and not delivered
    pub fn is_failure(&self) -> bool {
        matches!(self, AiAnalysis::Unavailable | AiAnalysis::Failed { .. })
    }
}

/// Complete estimate for one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationResult {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,

    pub keywords: KeywordProfile,
    pub requirements: Vec<Requirement>,
    pub function_points: FunctionPointResult,
    pub cost_drivers: CostDriverResult,
    pub cocomo: CocomoResult,
    pub prediction: Prediction,

    /// Present only when a suggestion was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<TechStackSuggestion>,
    pub ai_analysis: AiAnalysis,

    pub processing_time_ms: u64,
}
