//! Cost-driver detection and the Effort Adjustment Factor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Driver name and multiplicative factor. The cue searched for in the text is the name
/// with underscores turned into spaces.
pub const COST_DRIVER_FACTORS: &[(&str, f64)] = &[
    ("real_time", 1.25),
    ("security", 1.15),
    ("performance", 1.10),
    ("complex_logic", 1.20),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostDriverResult {
    /// Product of all detected factors, rounded to two decimals; 1.0 when none
    #[serde(rename = "EAF")]
    pub eaf: f64,
    pub detected: BTreeMap<String, f64>,
}

pub fn detect_cost_drivers(text: &str) -> CostDriverResult {
    let lower = text.to_lowercase();
    let mut detected = BTreeMap::new();
    let mut eaf = 1.0_f64;

    for (name, factor) in COST_DRIVER_FACTORS {
        if lower.contains(&name.replace('_', " ")) {
            detected.insert((*name).to_string(), *factor);
            eaf *= factor;
        }
    }

    CostDriverResult {
        eaf: (eaf * 100.0).round() / 100.0,
        detected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_and_real_time() {
        let result =
            detect_cost_drivers("Security is paramount. Order tracking happens in Real Time.");
        assert_eq!(result.eaf, 1.44);
        assert_eq!(result.detected.len(), 2);
        assert_eq!(result.detected["real_time"], 1.25);
        assert_eq!(result.detected["security"], 1.15);
    }

    #[test]
    fn test_no_drivers() {
        let result = detect_cost_drivers("A plain brochure site.");
        assert_eq!(result.eaf, 1.0);
        assert!(result.detected.is_empty());
    }

    #[test]
    fn test_hyphenated_cue_is_not_matched() {
        let result = detect_cost_drivers("real-time dashboards");
        assert!(result.detected.is_empty());
    }

    #[test]
    fn test_all_drivers() {
        let result = detect_cost_drivers(
            "real time feeds, security audits, performance budgets and complex logic",
        );
        assert_eq!(result.detected.len(), 4);
        // 1.25 * 1.15 * 1.10 * 1.20 = 1.8975
        assert_eq!(result.eaf, 1.9);
        assert!(result.eaf >= 1.0);
    }
}
