//! External services consumed by the pipeline.
//!
//! - `traits`: seams for the generative analyst and the tech-stack advisor
//! - `outcome`: three-way result of an external call
//! - `gemini`: Google Gemini implementation of both seams
//! - `prompts`: prompt texts sent to the model

pub mod gemini;
pub mod outcome;
pub mod prompts;
pub mod traits;

pub use gemini::GeminiClient;
pub use outcome::ServiceOutcome;
pub use traits::{GenerativeAnalyst, TechStackAdvisor};
