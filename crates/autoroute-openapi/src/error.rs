//! Error types for OpenAPI projection.

use thiserror::Error;

/// Errors that can occur while building an OpenAPI document.
#[derive(Debug, Error)]
pub enum OpenApiError {
    /// Two endpoints map to the same path and method.
    #[error("Duplicate operation: {method} {path} is produced by more than one endpoint")]
    DuplicateOperation { method: String, path: String },

    /// A candidate and its resolved action describe different methods.
    #[error("Resolved action {action} does not belong to candidate {candidate}")]
    MismatchedAction { candidate: String, action: String },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
