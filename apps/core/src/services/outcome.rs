use serde::{Deserialize, Serialize};

/// Result of a call to an optional external service.
///
/// `Unavailable` means the service was never reachable by configuration (no key, no
/// endpoint); `Error` means it was called and failed. Callers decide whether either one
/// is substituted with a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ServiceOutcome<T> {
    Success(T),
    Unavailable,
    Error(String),
}

impl<T> ServiceOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ServiceOutcome::Success(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ServiceOutcome<U> {
        match self {
            ServiceOutcome::Success(value) => ServiceOutcome::Success(f(value)),
            ServiceOutcome::Unavailable => ServiceOutcome::Unavailable,
            ServiceOutcome::Error(detail) => ServiceOutcome::Error(detail),
        }
    }

    /// The success value, or `fallback()` for both other states
    pub fn unwrap_or_else(self, fallback: impl FnOnce() -> T) -> T {
        match self {
            ServiceOutcome::Success(value) => value,
            _ => fallback(),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for ServiceOutcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => ServiceOutcome::Success(value),
            Err(e) => ServiceOutcome::Error(e.to_string()),
        }
    }
}
