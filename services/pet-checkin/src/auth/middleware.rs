//! Route-level authorization middleware.
//!
//! # Purpose
//! Run the full bearer pipeline (header extraction, token verification,
//! permission check) before a protected handler executes, and attach the
//! verified claims to the request for handlers that need them.
//!
//! # Architectural role
//! Installed per route group with `axum::middleware::from_fn_with_state`;
//! the required permission list is baked into the closure at router build
//! time. Any failure short-circuits with the fixed error body, so handlers
//! only ever see authenticated requests.
use crate::app::AppState;
use crate::auth::error::AuthError;
use crate::auth::permissions::check_permissions;
use crate::auth::verify::{extract_bearer_token, VerifiedClaims};
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Verify the request's bearer token and check it against `required`.
///
/// On success the [`VerifiedClaims`] are inserted as a request extension.
pub async fn authorize(
    State(state): State<AppState>,
    required: &'static [&'static str],
    mut request: Request,
    next: Next,
) -> Response {
    let claims = match authenticate(&state, request.headers()).await {
        Ok(claims) => claims,
        Err(err) => return reject(err),
    };
    if let Err(err) = check_permissions(required, &claims) {
        return reject(err);
    }
    request.extensions_mut().insert(claims);
    next.run(request).await
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<VerifiedClaims, AuthError> {
    let token = extract_bearer_token(headers)?;
    state.verifier.verify(token).await
}

fn reject(err: AuthError) -> Response {
    let status = err.status().as_u16();
    tracing::debug!(status, error = %err, "request rejected");
    metrics::counter!("checkin_auth_rejections_total", "status" => status.to_string()).increment(1);
    err.into_response()
}
