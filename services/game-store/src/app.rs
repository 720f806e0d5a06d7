//! Catalog HTTP application wiring.
//!
//! Builds the Axum router and defines the shared application state injected
//! into handlers. The catalog is a public API: no routes carry authorization.
use crate::api;
use crate::api::openapi::ApiDoc;
use crate::observability;
use crate::store::CatalogStore;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            let parent = observability::trace_context_from_headers(request.headers());
            let span = tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            );
            span.set_parent(parent);
            span
        });

    Router::new()
        .route(
            "/games",
            get(api::games::list_games).post(api::games::create_game),
        )
        .route(
            "/games/:id",
            get(api::games::get_game)
                .put(api::games::update_game)
                .delete(api::games::delete_game),
        )
        .route(
            "/consoles",
            get(api::consoles::list_consoles).post(api::consoles::create_console),
        )
        .route(
            "/consoles/:id",
            get(api::consoles::get_console)
                .put(api::consoles::update_console)
                .delete(api::consoles::delete_console),
        )
        .merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs").url("/v1/openapi.json", ApiDoc::openapi()),
        )
        .layer(trace_layer)
        .with_state(state)
}
