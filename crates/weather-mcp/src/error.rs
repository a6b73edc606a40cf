//! Error types for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Failures outside tool dispatch. Dispatch errors never reach this type;
/// they are rendered as JSON-RPC error envelopes.
#[derive(Debug, Error)]
pub enum ApiError {
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Internal error: {}", self);
        let body = serde_json::json!({
            "error": self.to_string()
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
