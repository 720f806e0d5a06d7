//! Pet check-in HTTP service entry point.
//!
//! # Purpose
//! Wires configuration, storage, the token verifier, and the HTTP router,
//! then starts the API server and the metrics endpoint.
//!
//! # Notes
//! The `build_state` helper keeps wiring testable and minimizes main setup
//! logic.
use anyhow::Context;
use pet_checkin::app::{build_router, AppState};
use pet_checkin::auth::verify::TokenVerifier;
use pet_checkin::config::{CheckinConfig, StorageBackend};
use pet_checkin::observability;
use pet_checkin::store::memory::InMemoryStore;
use pet_checkin::store::postgres::PostgresStore;
use pet_checkin::store::CheckinStore;
use std::future::Future;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CheckinConfig::from_env_or_yaml().expect("check-in config");
    run_with_shutdown(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run_with_shutdown<F>(config: CheckinConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics_handle = observability::init_observability("pet-checkin");
    let state = build_state(&config).await?;
    let metrics_task = tokio::spawn(observability::serve_metrics(
        metrics_handle,
        config.metrics_bind,
    ));

    let app = build_router(state);

    let addr = config.bind_addr;
    tracing::info!(%addr, "pet check-in listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tokio::pin!(shutdown);
    tokio::select! {
        result = axum::serve(listener, app.into_make_service()) => {
            result?;
        }
        _ = &mut shutdown => {}
    }

    metrics_task.abort();
    let _ = metrics_task.await;
    Ok(())
}

async fn build_state(config: &CheckinConfig) -> anyhow::Result<AppState> {
    let store: Arc<dyn CheckinStore> = match config.storage {
        StorageBackend::Memory => Arc::new(InMemoryStore::new()),
        StorageBackend::Postgres => {
            let pg = config
                .postgres
                .as_ref()
                .context("postgres configuration missing")?;
            Arc::new(PostgresStore::connect(pg).await?)
        }
    };

    Ok(AppState {
        store,
        verifier: TokenVerifier::new(&config.auth),
    })
}
