use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::GeminiSettings;
use crate::error::AppError;
use crate::models::ProjectAnalysis;
use crate::services::outcome::ServiceOutcome;
use crate::services::prompts::{
    analysis_system_prompt, truncate_chars, TECH_STACK_INPUT_LIMIT, TECH_STACK_SYSTEM_PROMPT,
};
use crate::services::traits::{GenerativeAnalyst, TechStackAdvisor};

/// Client for the Gemini `generateContent` endpoint.
///
/// Without an API key every call resolves to [`ServiceOutcome::Unavailable`] and no
/// request is sent.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    analysis_model: String,
    advisor_model: String,
}

impl GeminiClient {
    pub fn new(settings: &GeminiSettings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.api_base.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            analysis_model: settings.analysis_model.clone(),
            advisor_model: settings.advisor_model.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// POST a payload and return the concatenated text parts of the first candidate
    async fn generate(&self, model: &str, api_key: &str, payload: &Value) -> Result<String, AppError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        debug!("Calling Gemini model {}", model);

        let res = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Service(format!(
                "Gemini request failed with status {}: {}",
                status, body
            )));
        }

        let body: Value = res.json().await?;
        let text: String = body["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
            .unwrap_or_default();
        Ok(text)
    }

    async fn request_analysis(&self, api_key: &str, document_text: &str) -> Result<ProjectAnalysis, AppError> {
        let payload = json!({
            "system_instruction": {
                "parts": [{ "text": analysis_system_prompt(Utc::now().date_naive()) }]
            },
            "contents": [{
                "parts": [
                    { "text": "Here is the project requirements document:" },
                    { "text": document_text },
                    { "text": "Please provide the analysis in the specified JSON format." }
                ]
            }]
        });

        let reply = self.generate(&self.analysis_model, api_key, &payload).await?;
        parse_project_analysis(&reply)
    }
}

/// Cut the outermost `{ ... }` out of a model reply
pub fn extract_json_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (start < end).then(|| &reply[start..=end])
}

/// Parse a model reply into a [`ProjectAnalysis`]; replies are never repaired
pub fn parse_project_analysis(reply: &str) -> Result<ProjectAnalysis, AppError> {
    let object = extract_json_object(reply.trim()).ok_or_else(|| {
        AppError::Service("No valid JSON object found in the model's response".to_string())
    })?;
    serde_json::from_str(object)
        .map_err(|e| AppError::Service(format!("Malformed analysis JSON: {}", e)))
}

#[async_trait]
impl GenerativeAnalyst for GeminiClient {
    async fn analyze_project(&self, document_text: &str) -> ServiceOutcome<ProjectAnalysis> {
        let Some(api_key) = self.api_key.as_deref() else {
            return ServiceOutcome::Unavailable;
        };

        info!("Requesting project analysis ({} characters)", document_text.len());
        match self.request_analysis(api_key, document_text).await {
            Ok(analysis) => ServiceOutcome::Success(analysis),
            Err(e) => {
                warn!("Project analysis failed: {}", e);
                ServiceOutcome::Error(e.to_string())
            }
        }
    }
}

#[async_trait]
impl TechStackAdvisor for GeminiClient {
    async fn advise(&self, document_text: &str) -> ServiceOutcome<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return ServiceOutcome::Unavailable;
        };

        let payload = json!({
            "contents": [{
                "parts": [
                    { "text": TECH_STACK_SYSTEM_PROMPT },
                    { "text": format!("SRS:\n{}", truncate_chars(document_text, TECH_STACK_INPUT_LIMIT)) }
                ]
            }],
            "generationConfig": { "temperature": 0.3, "maxOutputTokens": 256 }
        });

        self.generate(&self.advisor_model, api_key, &payload).await.into()
    }
}
