//! Integration tests for the pet endpoints.
mod common;
mod http_helpers;

use axum::http::StatusCode;
use common::{build_app_with_jwks, manager_token, read_json, tech_token};
use http_helpers::{bare_request, json_request};
use serde_json::json;
use tower::ServiceExt;

fn expected_404(message: &str) -> serde_json::Value {
    json!({"success": false, "error": 404, "message": message})
}

fn expected_422(message: &str) -> serde_json::Value {
    json!({"success": false, "error": 422, "message": message})
}

#[tokio::test]
async fn list_pets_returns_pets() {
    let (app, _store) = build_app_with_jwks().await;
    let token = tech_token();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/pets",
            &token,
            json!({"name": "Fifi", "species": "dog", "breed": "pug"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(bare_request("GET", "/pets", &token))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(
        body["pets"],
        json!([{"id": 1, "name": "Fifi", "species": "dog", "breed": "pug"}])
    );
}

#[tokio::test]
async fn list_pets_empty_is_404() {
    let (app, _store) = build_app_with_jwks().await;
    let response = app
        .oneshot(bare_request("GET", "/pets", &tech_token()))
        .await
        .expect("response");
    assert_eq!(read_json(response).await, expected_404("No pets found"));
}

#[tokio::test]
async fn get_missing_pet_is_404() {
    let (app, _store) = build_app_with_jwks().await;
    let response = app
        .oneshot(bare_request("GET", "/pets/100", &tech_token()))
        .await
        .expect("response");
    assert_eq!(read_json(response).await, expected_404("Pet not found"));
}

#[tokio::test]
async fn create_pet_requires_name_and_species() {
    let (app, _store) = build_app_with_jwks().await;
    let token = tech_token();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/pets",
            &token,
            json!({"species": "dog", "breed": "pug"}),
        ))
        .await
        .expect("response");
    assert_eq!(
        read_json(response).await,
        expected_422("Pet must have a name")
    );

    let response = app
        .oneshot(json_request(
            "POST",
            "/pets",
            &token,
            json!({"name": "Fifi", "breed": "pug"}),
        ))
        .await
        .expect("response");
    assert_eq!(
        read_json(response).await,
        expected_422("Pet must have a species")
    );
}

#[tokio::test]
async fn create_pet_defaults_breed_to_empty() {
    let (app, _store) = build_app_with_jwks().await;
    let token = tech_token();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/pets",
            &token,
            json!({"name": "Libby", "species": "dog"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(bare_request("GET", "/pets/1", &token))
        .await
        .expect("response");
    let body = read_json(response).await;
    assert_eq!(
        body["pet"],
        json!({"id": 1, "name": "Libby", "species": "dog", "breed": ""})
    );
}

#[tokio::test]
async fn update_pet_changes_only_named_fields() {
    let (app, _store) = build_app_with_jwks().await;
    let token = tech_token();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/pets",
            &token,
            json!({"name": "Fifi", "species": "dog", "breed": "pug"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/pets/1",
            &token,
            json!({"breed": "French Bulldog"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(bare_request("GET", "/pets/1", &token))
        .await
        .expect("response");
    let body = read_json(response).await;
    assert_eq!(
        body["pet"],
        json!({"id": 1, "name": "Fifi", "species": "dog", "breed": "French Bulldog"})
    );
}

#[tokio::test]
async fn update_missing_pet_is_404() {
    let (app, _store) = build_app_with_jwks().await;
    let response = app
        .oneshot(json_request(
            "PUT",
            "/pets/7",
            &tech_token(),
            json!({"name": "ghost"}),
        ))
        .await
        .expect("response");
    assert_eq!(
        read_json(response).await,
        expected_404("Can not update, pet does not exist")
    );
}

#[tokio::test]
async fn update_pet_validation_errors() {
    let (app, _store) = build_app_with_jwks().await;
    let token = tech_token();

    let response = app
        .clone()
        .oneshot(bare_request("PUT", "/pets/1", &token))
        .await
        .expect("response");
    assert_eq!(
        read_json(response).await,
        expected_422("Request missing body")
    );

    let response = app
        .oneshot(json_request("PUT", "/pets/1", &token, json!({})))
        .await
        .expect("response");
    assert_eq!(
        read_json(response).await,
        expected_422("Must include a value to update")
    );
}

#[tokio::test]
async fn delete_pet_lifecycle() {
    let (app, _store) = build_app_with_jwks().await;
    let token = manager_token();
    for pet in [
        json!({"name": "Fifi", "species": "dog", "breed": "pug"}),
        json!({"name": "Libby", "species": "dog", "breed": "black lab"}),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/pets", &token, pet))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app
        .clone()
        .oneshot(bare_request("DELETE", "/pets/1", &token))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(bare_request("GET", "/pets", &token))
        .await
        .expect("response");
    let body = read_json(response).await;
    assert_eq!(body["pets"].as_array().map(Vec::len), Some(1));

    let response = app
        .clone()
        .oneshot(bare_request("DELETE", "/pets/1", &token))
        .await
        .expect("response");
    assert_eq!(
        read_json(response).await,
        expected_404("Can not delete, pet does not exist")
    );

    let response = app
        .oneshot(bare_request("DELETE", "/pets/2", &tech_token()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
