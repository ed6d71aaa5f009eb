//! Estimation Pipeline Tests
//!
//! Whole-document runs of the deterministic pipeline.

use crate::estimation::{
    CocomoMode, Complexity, Entity, EntityCapability, EstimationPipeline, PredictorWeights,
    RecognizerKind,
};
use crate::error::AppError;
use crate::models::EstimationOptions;
use std::sync::Arc;

const SAMPLE_SRS: &str = "Online Bookstore SRS. \
The customer shall add books to the cart. \
The customer must submit the order with a payment card. \
The system shall display an order report. \
The portal should support real time stock updates with strong security. \
The budget is $40,000.";

fn pipeline_with(options: EstimationOptions, weights: PredictorWeights) -> EstimationPipeline {
    let recognizer = Arc::new(EntityCapability::resolve(RecognizerKind::Pattern));
    EstimationPipeline::new(options, weights, recognizer).expect("valid options")
}

fn default_pipeline() -> EstimationPipeline {
    pipeline_with(EstimationOptions::default(), PredictorWeights::default())
}

#[cfg(test)]
mod document_tests {
    use super::*;

    #[test]
    fn test_sample_requirements() {
        let result = default_pipeline().estimate(SAMPLE_SRS).unwrap();

        let texts: Vec<&str> = result.requirements.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "add books to the cart.",
                "submit the order with a payment card.",
                "display an order report.",
                "support real time stock updates with strong security.",
            ]
        );

        let tiers: Vec<Complexity> = result.requirements.iter().map(|r| r.complexity).collect();
        assert_eq!(
            tiers,
            vec![Complexity::Low, Complexity::High, Complexity::Low, Complexity::High]
        );
        assert_eq!(result.requirements[3].matched_keywords, vec!["update", "security"]);
    }

    #[test]
    fn test_sample_sizing_and_cost() {
        let result = default_pipeline().estimate(SAMPLE_SRS).unwrap();

        assert_eq!(result.function_points.inputs, 2);
        assert_eq!(result.function_points.outputs, 1);
        assert_eq!(result.function_points.data_entities, 0);
        assert_eq!(result.function_points.function_points, 13);

        assert_eq!(result.cost_drivers.eaf, 1.44);
        assert_eq!(result.cost_drivers.detected.len(), 2);

        // Short documents sit on the KLOC floor
        assert_eq!(result.cocomo.kloc_estimate, 0.5);
        assert_eq!(result.cocomo.mode, CocomoMode::Organic);

        // Base weeks plus the payments flag
        assert_eq!(result.prediction.time_weeks, 6);
    }

    #[test]
    fn test_sample_keyword_profile() {
        let result = default_pipeline().estimate(SAMPLE_SRS).unwrap();
        let profile = &result.keywords;

        assert_eq!(profile.top_keywords.len(), 12);
        assert_eq!(&profile.top_keywords[..4], &["customer", "shall", "order", "online"]);
        assert_eq!(
            profile.entities,
            vec![Entity {
                text: "$40,000".to_string(),
                label: "MONEY".to_string(),
            }]
        );
    }

    #[test]
    fn test_top_k_option_limits_keywords() {
        let options = EstimationOptions {
            top_k: 2,
            ..EstimationOptions::default()
        };
        let result = pipeline_with(options, PredictorWeights::default())
            .estimate(SAMPLE_SRS)
            .unwrap();
        assert_eq!(result.keywords.top_keywords, vec!["customer", "shall"]);
    }

    #[test]
    fn test_estimates_are_deterministic() {
        let pipeline = default_pipeline();
        let first = pipeline.estimate(SAMPLE_SRS).unwrap();
        let second = pipeline.estimate(SAMPLE_SRS).unwrap();

        assert_ne!(first.report_id, second.report_id);
        assert_eq!(first.keywords, second.keywords);
        assert_eq!(first.requirements, second.requirements);
        assert_eq!(first.function_points, second.function_points);
        assert_eq!(first.cost_drivers, second.cost_drivers);
        assert_eq!(first.cocomo, second.cocomo);
        assert_eq!(first.prediction, second.prediction);
    }
}

#[cfg(test)]
mod edge_case_tests {
    use super::*;
    use crate::estimation::AiAnalysis;

    #[test]
    fn test_blank_document_is_input_error() {
        let err = default_pipeline().estimate("  \n ").unwrap_err();
        assert!(matches!(err, AppError::EmptyDocument));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_document_without_tokens() {
        let result = default_pipeline().estimate("123 456 !!!").unwrap();

        assert_eq!(result.keywords.word_count, 0);
        assert!(result.keywords.top_keywords.is_empty());
        assert!(result.requirements.is_empty());
        assert_eq!(result.function_points.function_points, 0);
        assert_eq!(result.cost_drivers.eaf, 1.0);
        assert!(result.cost_drivers.detected.is_empty());
        assert_eq!(result.cocomo.kloc_estimate, 0.5);
        assert_eq!(result.prediction.time_weeks, 4);
        assert_eq!(result.ai_analysis, AiAnalysis::NotRequested);
        assert!(result.tech_stack.is_none());
    }

    #[test]
    fn test_unavailable_recognizer_degrades_to_no_entities() {
        let pipeline = EstimationPipeline::new(
            EstimationOptions::default(),
            PredictorWeights::default(),
            Arc::new(EntityCapability::Unavailable),
        )
        .unwrap();

        let result = pipeline.estimate(SAMPLE_SRS).unwrap();
        assert!(result.keywords.entities.is_empty());
        assert!(!result.keywords.top_keywords.is_empty());
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = EstimationOptions {
            top_k: 0,
            ..EstimationOptions::default()
        };
        let result = EstimationPipeline::new(
            options,
            PredictorWeights::default(),
            Arc::new(EntityCapability::Unavailable),
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}

#[cfg(test)]
mod option_tests {
    use super::*;

    #[test]
    fn test_embedded_mode_costs_more() {
        let organic = default_pipeline().estimate(SAMPLE_SRS).unwrap();
        let embedded = pipeline_with(
            EstimationOptions {
                mode: CocomoMode::Embedded,
                ..EstimationOptions::default()
            },
            PredictorWeights::default(),
        )
        .estimate(SAMPLE_SRS)
        .unwrap();

        assert!(embedded.cocomo.effort_pm > organic.cocomo.effort_pm);
        assert!(embedded.cocomo.cost_usd > organic.cocomo.cost_usd);
        // Heuristic parts do not depend on the mode
        assert_eq!(embedded.function_points, organic.function_points);
        assert_eq!(embedded.prediction, organic.prediction);
    }

    #[test]
    fn test_zero_rate_gives_zero_cost() {
        let result = pipeline_with(
            EstimationOptions {
                rate_per_pm_usd: 0.0,
                ..EstimationOptions::default()
            },
            PredictorWeights::default(),
        )
        .estimate(SAMPLE_SRS)
        .unwrap();
        assert_eq!(result.cocomo.cost_usd, 0);
        assert!(result.cocomo.effort_pm > 0.0);
    }

    #[test]
    fn test_supplied_weights_drive_prediction() {
        let mut weights = PredictorWeights::default();
        weights.set("base_weeks", 10).unwrap();
        weights.set("payments", 5).unwrap();

        let result = pipeline_with(EstimationOptions::default(), weights)
            .estimate(SAMPLE_SRS)
            .unwrap();
        assert_eq!(result.prediction.time_weeks, 15);
    }

    #[test]
    fn test_prediction_is_clamped() {
        let mut weights = PredictorWeights::default();
        weights.set("base_weeks", -20).unwrap();
        let low = pipeline_with(EstimationOptions::default(), weights)
            .estimate(SAMPLE_SRS)
            .unwrap();
        assert_eq!(low.prediction.time_weeks, 2);

        weights.set("base_weeks", 500).unwrap();
        let high = pipeline_with(EstimationOptions::default(), weights)
            .estimate(SAMPLE_SRS)
            .unwrap();
        assert_eq!(high.prediction.time_weeks, 52);
    }

    #[test]
    fn test_result_serializes_with_eaf_key() {
        let result = default_pipeline().estimate(SAMPLE_SRS).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["cost_drivers"]["EAF"], serde_json::json!(1.44));
        assert_eq!(json["ai_analysis"]["status"], "not_requested");
        assert!(json.get("tech_stack").is_none());
    }
}
