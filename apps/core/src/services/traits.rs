use async_trait::async_trait;

use crate::models::ProjectAnalysis;
use crate::services::outcome::ServiceOutcome;

/// Remote model producing a full project analysis from SRS text.
///
/// Treated as an opaque oracle: the pipeline may call it or skip it, and its failures
/// never affect the heuristic estimate.
#[async_trait]
pub trait GenerativeAnalyst: Send + Sync + 'static {
    async fn analyze_project(&self, document_text: &str) -> ServiceOutcome<ProjectAnalysis>;
}

/// Remote advisor answering with free-form tech-stack advice.
#[async_trait]
pub trait TechStackAdvisor: Send + Sync + 'static {
    /// Raw reply text; coercion into a list happens in the pipeline.
    async fn advise(&self, document_text: &str) -> ServiceOutcome<String>;
}
