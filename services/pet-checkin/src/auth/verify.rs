//! Bearer token extraction and JWT verification.
//!
//! # Purpose
//! Take the raw `Authorization` header of a protected request and either
//! produce fully verified claims or the precise rejection the API contract
//! requires. Nothing in a token is trusted until its signature, issuer,
//! audience, and expiry have all been checked against configuration.
//!
//! # Architectural role
//! This module is the boundary between attacker-controlled input and the
//! authorization system. The unverified header is decoded only to locate the
//! signing key (`kid`); every claim is validated after signature verification.
//!
//! # Key invariants
//! - A token whose signature does not verify against a key present in the
//!   fetched key set is never accepted; there is no fallback to unsigned
//!   trust.
//! - Each failure maps to a fixed status/message pair (see
//!   [`crate::auth::error::AuthError`]); the pairs are part of the wire
//!   contract.
//! - A `kid` with no matching key is reported as 403 "Missing permissions".
//!   The label conflates key resolution with permissions, but it is what the
//!   original service shipped and clients depend on it.
//!
//! # Concurrency model
//! Stateless apart from the shared [`KeyResolver`] cache; safe to call from
//! any number of concurrent requests.
use crate::auth::error::AuthError;
use crate::auth::jwks::{find_key, KeyResolver};
use crate::config::AuthConfig;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde_json::Value;

/// Claims that survived signature, issuer, audience, and expiry checks.
///
/// The payload is immutable after verification and is handed to handlers by
/// value through request extensions.
#[derive(Debug, Clone)]
pub struct VerifiedClaims(pub Value);

impl VerifiedClaims {
    /// String-valued claim lookup; non-string values are ignored.
    pub fn string_claim(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|value| value.as_str())
    }
}

/// Pull the bearer token out of the `Authorization` header.
///
/// The header must split on whitespace into exactly a `bearer` scheme
/// (case-insensitive) and a token. Each deviation has its own 401.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers.get(AUTHORIZATION).ok_or(AuthError::HeaderMissing)?;
    let header = header.to_str().map_err(|_| AuthError::HeaderMalformed)?;
    let parts: Vec<&str> = header.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(AuthError::HeaderMalformed);
    }
    if !parts[0].eq_ignore_ascii_case("bearer") {
        return Err(AuthError::NotBearerScheme);
    }
    Ok(parts[1])
}

/// Verifies bearer tokens against the configured issuer's key set.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    resolver: KeyResolver,
    jwks_url: String,
    expected_issuer: String,
    audience: String,
    algorithms: Vec<Algorithm>,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let jwks_url = config
            .jwks_url
            .clone()
            .unwrap_or_else(|| KeyResolver::jwks_url_for_domain(&config.issuer_domain));
        Self {
            resolver: KeyResolver::default(),
            jwks_url,
            expected_issuer: format!("https://{}/", config.issuer_domain),
            audience: config.audience.clone(),
            algorithms: config.algorithms.clone(),
        }
    }

    /// Verify a raw token string and return its claims.
    ///
    /// The pipeline is strictly ordered: header decode, `kid` presence, key
    /// resolution, then full signature and claim validation. The first failure
    /// is terminal.
    pub async fn verify(&self, token: &str) -> Result<VerifiedClaims, AuthError> {
        // The header is read without verifying the signature; it is only used
        // to select the signing key. Claims stay untrusted until validated.
        let header = decode_header(token).map_err(|_| AuthError::TokenUndecodable)?;
        let kid = header.kid.as_deref().ok_or(AuthError::KeyIdMissing)?;

        let jwks = self.resolver.keys(&self.jwks_url).await?;
        let key = match find_key(&jwks, kid) {
            Some(key) => Some(key.clone()),
            None => {
                // One forced refresh covers key rotation between cache fills.
                let refreshed = self.resolver.refresh(&self.jwks_url).await?;
                find_key(&refreshed, kid).cloned()
            }
        };
        let Some(key) = key else {
            return Err(AuthError::KeyNotFound);
        };

        let decoding_key =
            DecodingKey::from_jwk(&key).map_err(|_| AuthError::TokenUnparseable)?;
        let mut validation = Validation::new(self.algorithms[0]);
        validation.algorithms = self.algorithms.clone();
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&[self.expected_issuer.as_str()]);
        validation.leeway = 0;

        let data = decode::<Value>(token, &decoding_key, &validation)
            .map_err(map_verification_error)?;
        Ok(VerifiedClaims(data.claims))
    }
}

fn map_verification_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => AuthError::ClaimsInvalid,
        _ => AuthError::TokenUnparseable,
    }
}
