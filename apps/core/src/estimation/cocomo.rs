//! Basic COCOMO effort, schedule and cost.
//!
//! There is no code to count yet, so size is approximated from the SRS itself: one KLOC
//! per 5000 words, never below half a KLOC. This is a coarse proxy to be calibrated per
//! organization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Words of SRS text assumed per thousand lines of code
pub const WORDS_PER_KLOC: f64 = 5000.0;
/// Floor of the size proxy
pub const MIN_KLOC: f64 = 0.5;
/// Default personnel rate, USD per person-month
pub const DEFAULT_RATE_PER_PM_USD: f64 = 12_000.0;
const WEEKS_PER_MONTH: f64 = 4.345;

/// COCOMO project class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CocomoMode {
    #[default]
    Organic,
    Semidetached,
    Embedded,
}

/// Coefficients of `effort = a * kloc^b` and `months = c * effort^d`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CocomoCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl CocomoMode {
    pub fn coefficients(&self) -> CocomoCoefficients {
        match self {
            CocomoMode::Organic => CocomoCoefficients { a: 2.4, b: 1.05, c: 2.5, d: 0.38 },
            CocomoMode::Semidetached => CocomoCoefficients { a: 3.0, b: 1.12, c: 2.5, d: 0.35 },
            CocomoMode::Embedded => CocomoCoefficients { a: 3.6, b: 1.20, c: 2.5, d: 0.32 },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CocomoMode::Organic => "organic",
            CocomoMode::Semidetached => "semidetached",
            CocomoMode::Embedded => "embedded",
        }
    }
}

impl fmt::Display for CocomoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for CocomoMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "organic" => Ok(CocomoMode::Organic),
            "semidetached" | "semi-detached" => Ok(CocomoMode::Semidetached),
            "embedded" => Ok(CocomoMode::Embedded),
            other => Err(AppError::Config(format!(
                "Unknown COCOMO mode '{}' (expected organic, semidetached or embedded)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocomoResult {
    pub mode: CocomoMode,
    /// Size proxy, two decimals
    pub kloc_estimate: f64,
    /// Person-months, one decimal
    pub effort_pm: f64,
    /// Development time, two decimals
    pub time_months: f64,
    pub time_weeks: u32,
    pub cost_usd: u64,
}

/// KLOC proxy for a word count
pub fn kloc_from_words(word_count: usize) -> f64 {
    (word_count as f64 / WORDS_PER_KLOC).max(MIN_KLOC)
}

/// Estimate effort, schedule and cost for `word_count` words of SRS.
///
/// Rates below zero are treated as zero.
pub fn estimate(word_count: usize, mode: CocomoMode, rate_per_pm_usd: f64) -> CocomoResult {
    let CocomoCoefficients { a, b, c, d } = mode.coefficients();

    let kloc = kloc_from_words(word_count);
    let effort_pm = a * kloc.powf(b);
    let time_months = c * effort_pm.powf(d);
    // Whole dollars, fractions dropped
    let cost_usd = (effort_pm * rate_per_pm_usd.max(0.0)).trunc();

    CocomoResult {
        mode,
        kloc_estimate: round_to(kloc, 2),
        effort_pm: round_to(effort_pm, 1),
        time_months: round_to(time_months, 2),
        time_weeks: whole_weeks(time_months * WEEKS_PER_MONTH),
        cost_usd: cost_usd as u64,
    }
}

/// Nearest whole week, halves to even
fn whole_weeks(weeks: f64) -> u32 {
    weeks.round_ties_even() as u32
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
