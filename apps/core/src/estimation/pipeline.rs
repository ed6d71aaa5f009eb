//! Estimation Pipeline - Main orchestrator of the estimation module.
//!
//! The deterministic estimate is computed first and never waits on the network. The
//! optional external calls (project analysis, tech-stack advice) run afterwards,
//! concurrently, each bounded by a timeout and never retried.

use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::cocomo;
use super::cost_drivers::detect_cost_drivers;
use super::entities::EntityCapability;
use super::function_points::estimate_function_points;
use super::keywords::KeywordAnalyzer;
use super::predictor::{predict, PredictorWeights};
use super::report::{AiAnalysis, Document, EstimationResult};
use super::requirements::extract_requirements;
use super::tech_stack::{coerce_tech_stack, TechStackSuggestion};
use crate::config::DEFAULT_HTTP_TIMEOUT_SECS;
use crate::error::AppError;
use crate::models::EstimationOptions;
use crate::services::outcome::ServiceOutcome;
use crate::services::traits::{GenerativeAnalyst, TechStackAdvisor};

/// Composes every estimator into one [`EstimationResult`]
pub struct EstimationPipeline {
    options: EstimationOptions,
    weights: PredictorWeights,
    recognizer: Arc<EntityCapability>,
    keyword_analyzer: KeywordAnalyzer,
    service_timeout: Duration,
}

impl EstimationPipeline {
    /// Build a pipeline; options are validated here
    pub fn new(
        options: EstimationOptions,
        weights: PredictorWeights,
        recognizer: Arc<EntityCapability>,
    ) -> Result<Self, AppError> {
        options.validate()?;
        Ok(Self {
            keyword_analyzer: KeywordAnalyzer::with_config(3, options.top_k),
            options,
            weights,
            recognizer,
            service_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        })
    }

    /// Upper bound for each external call
    pub fn with_service_timeout(mut self, service_timeout: Duration) -> Self {
        self.service_timeout = service_timeout;
        self
    }

    pub fn options(&self) -> &EstimationOptions {
        &self.options
    }

    /// Run the deterministic pipeline only
    pub fn estimate(&self, text: &str) -> Result<EstimationResult, AppError> {
        let start = Instant::now();
        let document = Document::new(text)?;

        // 1. Keyword profile
        let keywords = self.keyword_analyzer.profile(&document.text, &self.recognizer);

        // 2. Requirements and their size
        let requirements = extract_requirements(&document.text);
        let function_points = estimate_function_points(&requirements);

        // 3. Cost model
        let cost_drivers = detect_cost_drivers(&document.text);
        let cocomo = cocomo::estimate(
            document.word_count(),
            self.options.mode,
            self.options.rate_per_pm_usd,
        );

        // 4. Heuristic predictor
        let prediction = predict(&document.text, &self.weights);

        info!(
            "Estimated document: {} words, {} requirements, {} FP, EAF {}",
            keywords.word_count,
            requirements.len(),
            function_points.function_points,
            cost_drivers.eaf
        );

        Ok(EstimationResult {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            keywords,
            requirements,
            function_points,
            cost_drivers,
            cocomo,
            prediction,
            tech_stack: None,
            ai_analysis: AiAnalysis::NotRequested,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Run the deterministic pipeline, then the requested external calls.
    ///
    /// Input errors abort before anything runs. External failures never do: a failed
    /// advisor resolves to the default stack and a failed analysis is recorded in
    /// [`EstimationResult::ai_analysis`].
    pub async fn analyze(
        &self,
        text: &str,
        analyst: Option<&dyn GenerativeAnalyst>,
        advisor: Option<&dyn TechStackAdvisor>,
    ) -> Result<EstimationResult, AppError> {
        let start = Instant::now();
        let mut result = self.estimate(text)?;

        let (ai_analysis, tech_stack) = tokio::join!(
            self.run_analysis(text, analyst),
            self.run_advisor(text, advisor)
        );

        result.ai_analysis = ai_analysis;
        result.tech_stack = tech_stack;
        result.processing_time_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }

    async fn run_analysis(&self, text: &str, analyst: Option<&dyn GenerativeAnalyst>) -> AiAnalysis {
        if !self.options.request_ai_analysis {
            return AiAnalysis::NotRequested;
        }
        let Some(analyst) = analyst else {
            return AiAnalysis::Unavailable;
        };

        match timeout(self.service_timeout, analyst.analyze_project(text)).await {
            Ok(ServiceOutcome::Success(analysis)) => AiAnalysis::Completed { analysis },
            Ok(ServiceOutcome::Unavailable) => {
                warn!("Project analysis requested but no AI service is configured");
                AiAnalysis::Unavailable
            }
            Ok(ServiceOutcome::Error(error)) => AiAnalysis::Failed { error },
            Err(elapsed) => AiAnalysis::Failed {
                error: AppError::from(elapsed).to_string(),
            },
        }
    }

    async fn run_advisor(
        &self,
        text: &str,
        advisor: Option<&dyn TechStackAdvisor>,
    ) -> Option<TechStackSuggestion> {
        if !self.options.request_tech_stack {
            return None;
        }
        let Some(advisor) = advisor else {
            return Some(TechStackSuggestion::fallback());
        };

        let suggestion = match timeout(self.service_timeout, advisor.advise(text)).await {
            Ok(ServiceOutcome::Success(reply)) => coerce_tech_stack(&reply),
            Ok(ServiceOutcome::Unavailable) => TechStackSuggestion::fallback(),
            Ok(ServiceOutcome::Error(detail)) => {
                warn!("Tech-stack advisor failed, using defaults: {}", detail);
                TechStackSuggestion::fallback()
            }
            Err(_) => {
                warn!("Tech-stack advisor timed out, using defaults");
                TechStackSuggestion::fallback()
            }
        };
        Some(suggestion)
    }
}
