//! Check-in HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, attaches the per-path authorization layers, and
//! defines the shared application state injected into handlers.
//!
//! # Notes
//! Every data route is protected. The permission list attached to a path
//! covers all verbs that path serves, so each path lives in its own
//! sub-router with exactly one authorization layer.
use crate::api;
use crate::api::openapi::ApiDoc;
use crate::auth::middleware::authorize;
use crate::auth::verify::TokenVerifier;
use crate::observability;
use crate::store::CheckinStore;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CheckinStore>,
    pub verifier: TokenVerifier,
}

const OWNERS_COLLECTION: &[&str] = &["get-owners", "post-owners"];
const OWNERS_ITEM: &[&str] = &["get-owners", "put-owners", "delete-owners"];
const PETS_COLLECTION: &[&str] = &["get-pets", "post-pets"];
const PETS_ITEM: &[&str] = &["get-pets", "put-pets", "delete-pets"];
const APPOINTMENTS_COLLECTION: &[&str] = &["get-appointments", "post-appointments"];
const APPOINTMENTS_ITEM: &[&str] = &["get-appointments", "put-appointments", "delete-appointments"];

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

    let owners_collection = Router::new()
        .route(
            "/owners",
            get(api::owners::list_owners).post(api::owners::create_owner),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            |state: State<AppState>, request: Request, next: Next| {
                authorize(state, OWNERS_COLLECTION, request, next)
            },
        ));
    let owners_item = Router::new()
        .route(
            "/owners/:id",
            get(api::owners::get_owner)
                .put(api::owners::update_owner)
                .delete(api::owners::delete_owner),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            |state: State<AppState>, request: Request, next: Next| {
                authorize(state, OWNERS_ITEM, request, next)
            },
        ));

    let pets_collection = Router::new()
        .route(
            "/pets",
            get(api::pets::list_pets).post(api::pets::create_pet),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            |state: State<AppState>, request: Request, next: Next| {
                authorize(state, PETS_COLLECTION, request, next)
            },
        ));
    let pets_item = Router::new()
        .route(
            "/pets/:id",
            get(api::pets::get_pet)
                .put(api::pets::update_pet)
                .delete(api::pets::delete_pet),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            |state: State<AppState>, request: Request, next: Next| {
                authorize(state, PETS_ITEM, request, next)
            },
        ));

    let appointments_collection = Router::new()
        .route(
            "/appointments",
            get(api::appointments::list_appointments).post(api::appointments::create_appointment),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            |state: State<AppState>, request: Request, next: Next| {
                authorize(state, APPOINTMENTS_COLLECTION, request, next)
            },
        ));
    let appointments_item = Router::new()
        .route(
            "/appointments/:id",
            get(api::appointments::get_appointment)
                .put(api::appointments::update_appointment)
                .delete(api::appointments::delete_appointment),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            |state: State<AppState>, request: Request, next: Next| {
                authorize(state, APPOINTMENTS_ITEM, request, next)
            },
        ));

    Router::new()
        .merge(owners_collection)
        .merge(owners_item)
        .merge(pets_collection)
        .merge(pets_item)
        .merge(appointments_collection)
        .merge(appointments_item)
        .merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs").url("/v1/openapi.json", ApiDoc::openapi()),
        )
        .layer(trace_layer)
        .with_state(state)
}
