//! Heuristic effort predictor.
//!
//! A fixed-weight linear model over seven domain flags and the document length. The
//! weights are an explicit [`PredictorWeights`] value supplied by the caller; storing
//! them is the job of [`crate::weights_store`].

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const MIN_WEEKS: i64 = 2;
pub const MAX_WEEKS: i64 = 52;

/// Flag name and the cues that raise it
const FEATURES: &[(&str, &[&str])] = &[
    ("auth", &["auth", "authentication", "oauth", "jwt", "sso"]),
    ("payments", &["payment", "stripe", "paypal", "billing"]),
    ("realtime", &["realtime", "websocket", "stream", "socket"]),
    ("ml", &["ml", "machine learning", "model", "classify", "predict"]),
    ("mobile", &["mobile", "android", "ios", "react native", "flutter"]),
    ("api", &["api", "rest", "graphql"]),
    ("db", &["database", "db", "postgres", "mysql", "mongodb", "sql"]),
];

const BASELINE_SOFTWARE: &[&str] = &["Node.js 18+", "Python 3.10+", "Docker"];

const CUSTOM_MODEL_PLAN: &str = "Custom model pipeline: feature extraction from requirements \
(TF-IDF / embeddings), baseline classifier for requirement types; extend with NER-based slot \
filling to capture entities. Create labeled set from past SRS; train and evaluate with F1; \
integrate behind the API; set up monitoring and periodic retraining.";

/// Weight table of the predictor, in weeks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictorWeights {
    pub base_weeks: i64,
    pub auth: i64,
    pub payments: i64,
    pub realtime: i64,
    pub ml: i64,
    pub mobile: i64,
    pub api: i64,
    pub db: i64,
    pub per_length_k: i64,
}

impl Default for PredictorWeights {
    fn default() -> Self {
        Self {
            base_weeks: 4,
            auth: 1,
            payments: 2,
            realtime: 2,
            ml: 3,
            mobile: 2,
            api: 1,
            db: 1,
            per_length_k: 1,
        }
    }
}

impl PredictorWeights {
    /// Names of every weight, in storage order
    pub const NAMES: [&'static str; 9] = [
        "base_weeks",
        "auth",
        "payments",
        "realtime",
        "ml",
        "mobile",
        "api",
        "db",
        "per_length_k",
    ];

    pub fn get(&self, name: &str) -> Option<i64> {
        Some(match name {
            "base_weeks" => self.base_weeks,
            "auth" => self.auth,
            "payments" => self.payments,
            "realtime" => self.realtime,
            "ml" => self.ml,
            "mobile" => self.mobile,
            "api" => self.api,
            "db" => self.db,
            "per_length_k" => self.per_length_k,
            _ => return None,
        })
    }

    pub fn set(&mut self, name: &str, value: i64) -> Result<(), AppError> {
        let slot = match name {
            "base_weeks" => &mut self.base_weeks,
            "auth" => &mut self.auth,
            "payments" => &mut self.payments,
            "realtime" => &mut self.realtime,
            "ml" => &mut self.ml,
            "mobile" => &mut self.mobile,
            "api" => &mut self.api,
            "db" => &mut self.db,
            "per_length_k" => &mut self.per_length_k,
            other => {
                return Err(AppError::Validation(format!(
                    "Unknown predictor weight '{}'",
                    other
                )))
            }
        };
        *slot = value;
        Ok(())
    }

    /// `(name, value)` pairs in storage order
    pub fn entries(&self) -> Vec<(&'static str, i64)> {
        Self::NAMES
            .iter()
            .filter_map(|name| self.get(name).map(|value| (*name, value)))
            .collect()
    }
}

/// Binary domain flags plus the length bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    pub auth: bool,
    pub payments: bool,
    pub realtime: bool,
    pub ml: bool,
    pub mobile: bool,
    pub api: bool,
    pub db: bool,
    /// Whole thousands of whitespace-separated words
    pub length_k: i64,
}

impl Features {
    fn flag(&self, name: &str) -> bool {
        match name {
            "auth" => self.auth,
            "payments" => self.payments,
            "realtime" => self.realtime,
            "ml" => self.ml,
            "mobile" => self.mobile,
            "api" => self.api,
            "db" => self.db,
            _ => false,
        }
    }
}

pub fn featurize(text: &str) -> Features {
    let lower = text.to_lowercase();
    let has = |name: &str| {
        FEATURES
            .iter()
            .find(|(feature, _)| *feature == name)
            .is_some_and(|(_, cues)| cues.iter().any(|cue| lower.contains(cue)))
    };

    Features {
        auth: has("auth"),
        payments: has("payments"),
        realtime: has("realtime"),
        ml: has("ml"),
        mobile: has("mobile"),
        api: has("api"),
        db: has("db"),
        length_k: (text.split_whitespace().count() / 1000) as i64,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub time_weeks: u32,
    pub software_needed: Vec<String>,
    pub custom_model_plan: String,
}

/// Predict delivery time and tooling. Same text and weights always give the same output.
pub fn predict(text: &str, weights: &PredictorWeights) -> Prediction {
    let features = featurize(text);

    let flagged: i64 = FEATURES
        .iter()
        .filter(|(name, _)| features.flag(name))
        .filter_map(|(name, _)| weights.get(name))
        .fold(0, i64::saturating_add);
    let weeks = weights
        .base_weeks
        .saturating_add(flagged)
        .saturating_add(features.length_k.saturating_mul(weights.per_length_k));
    let weeks = weeks.clamp(MIN_WEEKS, MAX_WEEKS);

    let mut software: Vec<String> = BASELINE_SOFTWARE.iter().map(|s| s.to_string()).collect();
    if features.db {
        software.push("PostgreSQL or managed DB".to_string());
    }
    if features.ml {
        software.push("Python ML stack (scikit-learn / transformers)".to_string());
    }
    if features.mobile {
        software.push("Android Studio / Xcode (if native)".to_string());
    }
    if features.realtime {
        software.push("Redis / WebSocket gateway".to_string());
    }

    Prediction {
        time_weeks: weeks as u32,
        software_needed: software,
        custom_model_plan: CUSTOM_MODEL_PLAN.to_string(),
    }
}
