//! Test Module
//!
//! Scenario suites for the estimator. Unit tests live beside the code they cover.
//!
//! ## Test Categories
//! - `estimation_tests`: Deterministic pipeline output on whole documents
//! - `pipeline_tests`: Optional AI services, fallbacks and timeouts
//! - `weights_store_tests`: Seeding, tuning and resetting predictor weights
//! - `text_extract_tests`: Documents read from disk

pub mod estimation_tests;
