//! SRS Estimator core.
//!
//! Turns the text of a software requirements document into inferred requirements,
//! function points, a cost-adjustment factor, Basic COCOMO figures and a heuristic
//! delivery estimate, optionally enriched by a generative model.

pub mod config;
pub mod error;
pub mod estimation;
pub mod models;
pub mod services;
pub mod text_extract;
pub mod weights_store;

pub use error::AppError;

#[cfg(test)]
mod tests;
