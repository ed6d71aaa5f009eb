//! Function-point sizing from extracted requirements.

use serde::{Deserialize, Serialize};

use super::requirements::Requirement;

const INPUT_KEYWORDS: &[&str] = &["input", "enter", "add", "submit"];
const OUTPUT_KEYWORDS: &[&str] = &["output", "report", "display", "show", "export"];
const DATA_KEYWORDS: &[&str] = &["record", "entity", "table", "database", "data"];

const INPUT_WEIGHT: u32 = 4;
const OUTPUT_WEIGHT: u32 = 5;
const DATA_WEIGHT: u32 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionPointResult {
    pub inputs: u32,
    pub outputs: u32,
    pub data_entities: u32,
    pub function_points: u32,
}

/// Count input, output and data requirements and weight them 4 / 5 / 7.
///
/// A requirement can land in several buckets.
pub fn estimate_function_points(requirements: &[Requirement]) -> FunctionPointResult {
    let mut result = FunctionPointResult::default();

    for requirement in requirements {
        let lower = requirement.text.to_lowercase();
        let mentions = |keywords: &[&str]| keywords.iter().any(|kw| lower.contains(kw));

        if mentions(INPUT_KEYWORDS) {
            result.inputs += 1;
        }
        if mentions(OUTPUT_KEYWORDS) {
            result.outputs += 1;
        }
        if mentions(DATA_KEYWORDS) {
            result.data_entities += 1;
        }
    }

    result.function_points = INPUT_WEIGHT * result.inputs
        + OUTPUT_WEIGHT * result.outputs
        + DATA_WEIGHT * result.data_entities;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::requirements::extract_requirements;

    #[test]
    fn test_weighted_total() {
        let reqs = extract_requirements(
            "The clerk shall add items to the cart. The clerk must input the order number. \
             The system shall export a monthly report.",
        );
        let fp = estimate_function_points(&reqs);
        assert_eq!(fp.inputs, 2);
        assert_eq!(fp.outputs, 1);
        assert_eq!(fp.data_entities, 0);
        assert_eq!(fp.function_points, 13);
    }

    #[test]
    fn test_buckets_overlap() {
        let reqs = extract_requirements("Users shall submit data and display a report.");
        let fp = estimate_function_points(&reqs);
        assert_eq!((fp.inputs, fp.outputs, fp.data_entities), (1, 1, 1));
        assert_eq!(fp.function_points, 16);
    }

    #[test]
    fn test_no_requirements() {
        assert_eq!(estimate_function_points(&[]), FunctionPointResult::default());
    }
}
