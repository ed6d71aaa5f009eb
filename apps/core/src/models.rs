use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::estimation::cocomo::{CocomoMode, DEFAULT_RATE_PER_PM_USD};
use crate::estimation::keywords::DEFAULT_PROFILE_KEYWORDS;

/// Per-request knobs of the estimation pipeline.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct EstimationOptions {
    /// COCOMO project class.
    pub mode: CocomoMode,
    /// Personnel cost in USD per person-month.
    #[validate(range(min = 0.0))]
    pub rate_per_pm_usd: f64,
    /// Number of keywords kept in the document profile.
    #[validate(range(min = 1, max = 100))]
    pub top_k: usize,
    /// Ask the generative service for a full project analysis.
    pub request_ai_analysis: bool,
    /// Ask the advisor for a tech-stack suggestion.
    pub request_tech_stack: bool,
}

impl Default for EstimationOptions {
    fn default() -> Self {
        Self {
            mode: CocomoMode::Organic,
            rate_per_pm_usd: DEFAULT_RATE_PER_PM_USD,
            top_k: DEFAULT_PROFILE_KEYWORDS,
            request_ai_analysis: false,
            request_tech_stack: false,
        }
    }
}

/// A technology pick and the reason given for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechChoice {
    pub name: String,
    #[serde(default)]
    pub reason: String,
}

/// Recommended stack per layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechStackAnalysis {
    pub frontend: Option<TechChoice>,
    pub backend: Option<TechChoice>,
    pub database: Option<TechChoice>,
    pub deployment: Option<TechChoice>,
}

/// Figures the model reports as text or numbers; kept as raw JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionPointAnalysis {
    #[serde(rename = "totalFP", default)]
    pub total_fp: Value,
    #[serde(default)]
    pub analysis: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CocomoAnalysis {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub effort_months: Value,
    #[serde(default)]
    pub development_time_months: Value,
    #[serde(default)]
    pub personnel_required: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationAnalysis {
    #[serde(default)]
    pub function_points: FunctionPointAnalysis,
    #[serde(default)]
    pub cocomo: CocomoAnalysis,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimation {
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub personnel_cost: Value,
    #[serde(default)]
    pub infrastructure_cost: Value,
    #[serde(default)]
    pub total_project_cost: Value,
    #[serde(default)]
    pub breakdown: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskItem {
    pub risk: String,
    #[serde(default)]
    pub mitigation: String,
}

/// Project analysis produced by the generative service.
///
/// Name and summary are mandatory; a reply without them is treated as malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysis {
    pub project_name: String,
    pub project_summary: String,
    #[serde(default)]
    pub tech_stack: TechStackAnalysis,
    #[serde(default)]
    pub estimation: EstimationAnalysis,
    #[serde(default)]
    pub cost_estimation: CostEstimation,
    #[serde(default)]
    pub risk_analysis: Vec<RiskItem>,
}
