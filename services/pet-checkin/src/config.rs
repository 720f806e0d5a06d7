use anyhow::{Context, Result};
use jsonwebtoken::Algorithm;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;

// Check-in service configuration sourced from environment variables, with an
// optional YAML override file (CHECKIN_CONFIG).
#[derive(Debug, Clone)]
pub struct CheckinConfig {
    pub bind_addr: SocketAddr,
    pub metrics_bind: SocketAddr,
    pub storage: StorageBackend,
    pub postgres: Option<PostgresConfig>,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_ms: u64,
}

/// Bearer-token verification settings.
///
/// `jwks_url` overrides the derived `https://{issuer_domain}/.well-known/
/// jwks.json` endpoint for deployments (and tests) that publish their key
/// set elsewhere.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub issuer_domain: String,
    pub audience: String,
    pub algorithms: Vec<Algorithm>,
    pub jwks_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CheckinConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    storage: Option<String>,
    database_url: Option<String>,
    auth_domain: Option<String>,
    auth_audience: Option<String>,
    jwks_url: Option<String>,
}

impl CheckinConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("CHECKIN_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
            .parse()
            .with_context(|| "parse CHECKIN_BIND")?;
        let metrics_bind = std::env::var("CHECKIN_METRICS_BIND")
            .unwrap_or_else(|_| "0.0.0.0:9090".to_string())
            .parse()
            .with_context(|| "parse CHECKIN_METRICS_BIND")?;
        let storage = parse_storage(
            &std::env::var("CHECKIN_STORAGE").unwrap_or_else(|_| "memory".to_string()),
        )?;
        let postgres = match std::env::var("CHECKIN_DATABASE_URL") {
            Ok(url) => Some(PostgresConfig {
                url,
                max_connections: env_u32("CHECKIN_PG_MAX_CONNECTIONS", 8)?,
                acquire_timeout_ms: env_u64("CHECKIN_PG_ACQUIRE_TIMEOUT_MS", 5_000)?,
            }),
            Err(_) => None,
        };
        let issuer_domain = std::env::var("CHECKIN_AUTH_DOMAIN")
            .unwrap_or_else(|_| "pet-checkin.us.auth0.com".to_string());
        let audience =
            std::env::var("CHECKIN_AUTH_AUDIENCE").unwrap_or_else(|_| "pet-checkin".to_string());
        let algorithms = parse_algorithms(
            &std::env::var("CHECKIN_AUTH_ALGORITHMS").unwrap_or_else(|_| "RS256".to_string()),
        )?;
        let jwks_url = std::env::var("CHECKIN_JWKS_URL").ok();
        Ok(Self {
            bind_addr,
            metrics_bind,
            storage,
            postgres,
            auth: AuthConfig {
                issuer_domain,
                audience,
                algorithms,
                jwks_url,
            },
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("CHECKIN_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read CHECKIN_CONFIG: {path}"))?;
            let override_cfg: CheckinConfigOverride =
                serde_yaml::from_str(&contents).with_context(|| "parse check-in config yaml")?;
            if let Some(value) = override_cfg.bind_addr {
                config.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
            }
            if let Some(value) = override_cfg.metrics_bind {
                config.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
            }
            if let Some(value) = override_cfg.storage {
                config.storage = parse_storage(&value)?;
            }
            if let Some(url) = override_cfg.database_url {
                config.postgres = Some(PostgresConfig {
                    url,
                    max_connections: 8,
                    acquire_timeout_ms: 5_000,
                });
            }
            if let Some(value) = override_cfg.auth_domain {
                config.auth.issuer_domain = value;
            }
            if let Some(value) = override_cfg.auth_audience {
                config.auth.audience = value;
            }
            if let Some(value) = override_cfg.jwks_url {
                config.auth.jwks_url = Some(value);
            }
        }
        Ok(config)
    }
}

fn parse_storage(value: &str) -> Result<StorageBackend> {
    match value {
        "memory" => Ok(StorageBackend::Memory),
        "postgres" => Ok(StorageBackend::Postgres),
        other => anyhow::bail!("unknown storage backend: {other}"),
    }
}

fn parse_algorithms(value: &str) -> Result<Vec<Algorithm>> {
    let algorithms = value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<Algorithm>()
                .map_err(|_| anyhow::anyhow!("unknown signing algorithm: {part}"))
        })
        .collect::<Result<Vec<_>>>()?;
    anyhow::ensure!(!algorithms.is_empty(), "algorithm allow-list is empty");
    Ok(algorithms)
}

fn env_u32(key: &str, default: u32) -> Result<u32> {
    match std::env::var(key) {
        Ok(value) => value.parse().with_context(|| format!("parse {key}")),
        Err(_) => Ok(default),
    }
}

fn env_u64(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(value) => value.parse().with_context(|| format!("parse {key}")),
        Err(_) => Ok(default),
    }
}
