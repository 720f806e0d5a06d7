//! Authorization error taxonomy.
//!
//! # Purpose
//! Enumerates every way a protected request can fail authorization, pairing
//! each failure with the exact HTTP status and message the API has always
//! returned. Clients pattern-match on these strings, so the pairings are part
//! of the wire contract and must not drift.
//!
//! # Architectural role
//! This is the tagged result type that replaces exception-driven auth control
//! flow: the middleware threads `Result<VerifiedClaims, AuthError>` through
//! the verification pipeline and renders the error exactly once, at the HTTP
//! boundary via `IntoResponse`.
//!
//! # Key invariants
//! - Every variant is terminal for its request; nothing is retried.
//! - 401 covers authentication failures, 403 covers permission failures, and
//!   400 covers tokens we could not parse at all.
//! - `KeyNotFound` keeps the upstream "Missing permissions" label and 403
//!   status even though the failure is key resolution, not permissions; the
//!   pairing is preserved for compatibility.
use crate::api::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use thiserror::Error;

/// Why a protected request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization header required")]
    HeaderMissing,
    #[error("Malformed header")]
    HeaderMalformed,
    #[error("Auth token needs to be bearer token")]
    NotBearerScheme,
    #[error("Could not decode JWT token")]
    TokenUndecodable,
    #[error("Authorization malformed.")]
    KeyIdMissing,
    #[error("Missing permissions")]
    KeyNotFound,
    #[error("Token expired.")]
    TokenExpired,
    #[error("Incorrect claims. Please, check the audience and issuer.")]
    ClaimsInvalid,
    #[error("Unable to parse authentication token")]
    TokenUnparseable,
    #[error("Permissions not included in JWT.")]
    PermissionsAbsent,
    #[error("Permission not found.")]
    PermissionDenied,
    #[error("Unable to fetch signing keys")]
    KeyFetch,
}

impl AuthError {
    /// The fixed HTTP status paired with this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::HeaderMissing
            | AuthError::HeaderMalformed
            | AuthError::NotBearerScheme
            | AuthError::KeyIdMissing
            | AuthError::TokenExpired
            | AuthError::ClaimsInvalid => StatusCode::UNAUTHORIZED,
            AuthError::KeyNotFound
            | AuthError::PermissionsAbsent
            | AuthError::PermissionDenied => StatusCode::FORBIDDEN,
            AuthError::TokenUndecodable | AuthError::TokenUnparseable | AuthError::KeyFetch => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = ErrorResponse {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
