//! Shared fixtures for the catalog integration tests.
use axum::body::Body;
use axum::http::Request;
use axum::Router;
use game_store::app::{build_router, AppState};
use game_store::store::memory::InMemoryStore;
use serde_json::Value;
use std::sync::Arc;

pub async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn bare_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn build_app() -> Router {
    let store = Arc::new(InMemoryStore::new());
    build_router(AppState { store })
}
