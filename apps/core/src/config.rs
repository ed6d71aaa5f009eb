//! Environment-driven configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env` file.
//! Unset variables fall back to defaults; set-but-malformed ones are errors.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;
use crate::estimation::cocomo::{CocomoMode, DEFAULT_RATE_PER_PM_USD};
use crate::estimation::entities::RecognizerKind;
use crate::estimation::keywords::DEFAULT_PROFILE_KEYWORDS;
use crate::models::EstimationOptions;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_ADVISOR_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://srs-estimator.sqlite";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Settings of the Gemini client
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub api_base: String,
    pub analysis_model: String,
    pub advisor_model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini: GeminiSettings,
    /// Weight store location
    pub database_url: String,
    pub entity_recognizer: RecognizerKind,
    pub cocomo_mode: CocomoMode,
    pub rate_per_pm_usd: f64,
    pub top_k: usize,
}

impl AppConfig {
    /// Load `.env` (if any) and read the environment
    pub fn load() -> Result<Self, AppError> {
        if dotenv::dotenv().is_ok() {
            tracing::debug!("Loaded environment from .env");
        }
        Self::from_env()
    }

    /// Read configuration from the current environment only
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = non_empty_var("GEMINI_API_KEY").or_else(|| non_empty_var("GOOGLE_API_KEY"));
        let timeout_secs: u64 = parse_var("SRS_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(AppError::Config("SRS_HTTP_TIMEOUT_SECS must be positive".to_string()));
        }

        Ok(Self {
            gemini: GeminiSettings {
                api_key,
                api_base: non_empty_var("GEMINI_API_BASE")
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
                analysis_model: non_empty_var("GEMINI_ANALYSIS_MODEL")
                    .unwrap_or_else(|| DEFAULT_ANALYSIS_MODEL.to_string()),
                advisor_model: non_empty_var("GEMINI_MODEL")
                    .unwrap_or_else(|| DEFAULT_ADVISOR_MODEL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            database_url: non_empty_var("SRS_DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            entity_recognizer: parse_var("SRS_ENTITY_RECOGNIZER", RecognizerKind::Pattern)?,
            cocomo_mode: parse_var("SRS_COCOMO_MODE", CocomoMode::Organic)?,
            rate_per_pm_usd: parse_var("SRS_RATE_PER_PM", DEFAULT_RATE_PER_PM_USD)?,
            top_k: parse_var("SRS_TOP_K", DEFAULT_PROFILE_KEYWORDS)?,
        })
    }

    /// Pipeline options seeded from configuration; nothing external is requested
    pub fn estimation_options(&self) -> EstimationOptions {
        EstimationOptions {
            mode: self.cocomo_mode,
            rate_per_pm_usd: self.rate_per_pm_usd,
            top_k: self.top_k,
            ..EstimationOptions::default()
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_var<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty_var(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid value for {}: '{}' ({})", name, raw, e))),
        None => Ok(default),
    }
}
