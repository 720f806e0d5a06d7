//! API error helpers.
//!
//! # Purpose
//! Centralizes HTTP error response construction so every endpoint emits the
//! same `{"success": false, "error": <status>, "message": <text>}` body.
//! The message strings are part of the wire contract and are passed through
//! verbatim by the handlers.
//!
//! # Key invariants
//! - `status` always matches the `error` field of the body.
//! - Internal errors log the underlying cause server-side and return a
//!   generic message.
use crate::api::types::ErrorResponse;
use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Structured API error returned by handlers.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn api_error(status: StatusCode, message: &str) -> ApiError {
    ApiError {
        status,
        body: ErrorResponse {
            success: false,
            error: status.as_u16(),
            message: message.to_string(),
        },
    }
}

/// Build a 404 Not Found error.
pub fn api_not_found(message: &str) -> ApiError {
    api_error(StatusCode::NOT_FOUND, message)
}

/// Build a 422 Unprocessable Entity error for missing or empty input.
pub fn api_unprocessable(message: &str) -> ApiError {
    api_error(StatusCode::UNPROCESSABLE_ENTITY, message)
}

/// Build a 403 Forbidden error.
pub fn api_forbidden(message: &str) -> ApiError {
    api_error(StatusCode::FORBIDDEN, message)
}

/// Build a 500 Internal Server Error from a store error.
///
/// Logs the store error and returns a generic message to the client.
pub fn api_internal(message: &str, err: &StoreError) -> ApiError {
    tracing::error!(error = ?err, "check-in storage error");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, message)
}
