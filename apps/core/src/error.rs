use std::io;
use thiserror::Error;

/// Application-wide error type for the estimator.
///
/// Input errors (`EmptyDocument`, `UnsupportedFormat`, `UnreadableDocument`) are raised
/// before any pipeline stage runs. Degraded capabilities never show up here: they resolve
/// to empty or default values at the call site.
#[derive(Debug, Error)]
pub enum AppError {
    /// The document contained no text once extracted.
    #[error("The document is empty or could not be read")]
    EmptyDocument,

    /// The file extension is not one of the supported document formats.
    #[error("Unsupported file format: {0}. Please provide a .pdf, .docx, or .txt file")]
    UnsupportedFormat(String),

    /// A supported format failed to decode.
    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    /// Represents data validation errors (e.g., out-of-range options).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The generative analysis service failed or answered without usable JSON.
    #[error("AI service error: {0}")]
    Service(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors from the weight store, typically from `sqlx`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Whether the error belongs to the "bad input" category reported to the user as-is.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AppError::EmptyDocument | AppError::UnsupportedFormat(_) | AppError::UnreadableDocument(_)
        )
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(format!("HTTP request timed out: {}", err))
        } else {
            AppError::Service(format!("HTTP error: {}", err))
        }
    }
}
