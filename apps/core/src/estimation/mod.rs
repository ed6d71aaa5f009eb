//! # Estimation Module
//!
//! Deterministic, non-LLM estimation of an SRS document.
//!
//! ## Components
//! - `keywords`: tokenizer and keyword frequency ranking
//! - `entities`: optional named-entity recognizer capability
//! - `requirements`: modal-verb requirement extraction and complexity tiers
//! - `function_points`: weighted input / output / data counts
//! - `cost_drivers`: Effort Adjustment Factor
//! - `cocomo`: Basic COCOMO effort, schedule and cost
//! - `predictor`: fixed-weight effort predictor
//! - `tech_stack`: coercion of tech-stack advice
//! - `report`: output data structure
//! - `pipeline`: main orchestrator

pub mod cocomo;
pub mod cost_drivers;
pub mod entities;
pub mod function_points;
pub mod keywords;
pub mod pipeline;
pub mod predictor;
pub mod report;
pub mod requirements;
pub mod tech_stack;

// Re-export main types for convenience
pub use cocomo::{CocomoMode, CocomoResult};
pub use cost_drivers::CostDriverResult;
pub use entities::{Entity, EntityCapability, EntityRecognizer, RecognizerKind};
pub use function_points::FunctionPointResult;
pub use keywords::{KeywordAnalyzer, KeywordProfile};
pub use pipeline::EstimationPipeline;
pub use predictor::{Prediction, PredictorWeights};
pub use report::{AiAnalysis, Document, EstimationResult};
pub use requirements::{Complexity, Requirement};
pub use tech_stack::{SuggestionSource, TechStackSuggestion};
