//! Planner service error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur talking to the planner service.
///
/// All of these mean "upstream unavailable" to the session layer: the
/// session keeps its previous bundle and revision, the message is shown to
/// the user, and the session stays usable for a retry.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Planner API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlannerError {
    /// Check if this error is worth retrying
    pub fn is_retryable(&self) -> bool {
        match self {
            PlannerError::ApiError { status, .. } => is_retryable_status(*status),
            PlannerError::Network(_) => true,
            PlannerError::Timeout(_) => true,
            PlannerError::InvalidResponse(_) => false,
            PlannerError::Json(_) => false,
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}
