//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all API endpoints. It implements
//! `axum::response::IntoResponse` to produce structured JSON error responses
//! with appropriate HTTP status codes.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use algoviz_core::DispatchError;

/// Structured error detail in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured details (e.g., the exceeded limit).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unknown algorithm or route (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed body or input the engine cannot take (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Input exceeds a configured size limit (413).
    #[error("payload too large: {message}")]
    PayloadTooLarge {
        message: String,
        limit: usize,
        actual: usize,
    },

    /// Internal server error (500).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ApiErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: msg.clone(),
                    details: None,
                },
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiErrorDetail {
                    code: "BAD_REQUEST".to_string(),
                    message: msg.clone(),
                    details: None,
                },
            ),
            ApiError::PayloadTooLarge {
                message,
                limit,
                actual,
            } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ApiErrorDetail {
                    code: "LIMIT_EXCEEDED".to_string(),
                    message: message.clone(),
                    details: Some(serde_json::json!({ "limit": limit, "actual": actual })),
                },
            ),
            ApiError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: msg.clone(),
                    details: None,
                },
            ),
        };

        let body = serde_json::json!({
            "success": false,
            "error": detail,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        match &err {
            DispatchError::UnknownAlgorithm { .. } => ApiError::NotFound(err.to_string()),
            DispatchError::InvalidInput { .. } => ApiError::BadRequest(err.to_string()),
            DispatchError::LimitExceeded { limit, actual, .. } => ApiError::PayloadTooLarge {
                message: err.to_string(),
                limit: *limit,
                actual: *actual,
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use algoviz_core::AlgorithmId;

    use super::*;

    #[test]
    fn dispatch_errors_map_to_statuses() {
        let cases = [
            (
                DispatchError::UnknownAlgorithm { name: "bogo".into() },
                StatusCode::NOT_FOUND,
            ),
            (
                DispatchError::InvalidInput {
                    algorithm: AlgorithmId::Lcs,
                    reason: "missing field `str1`".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                DispatchError::LimitExceeded {
                    algorithm: AlgorithmId::NQueens,
                    what: "board size",
                    limit: 12,
                    actual: 20,
                },
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
        ];
        for (err, status) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }
}
