//! Integration tests for the appointment endpoints.
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

async fn seed_pet_and_owner(app: &axum::Router, token: &str) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/pets",
            token,
            json!({"name": "Fifi", "species": "dog", "breed": "pug"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/owners",
            token,
            json!({"name": "Bob Ross", "phone": "122-344-5666"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn appointment_round_trip() {
    let (app, _store) = build_app_with_jwks().await;
    let token = tech_token();
    seed_pet_and_owner(&app, &token).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/appointments",
            &token,
            json!({"time": "10:00", "date": "1/1/2022", "pet_id": 1, "owner_id": 1}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(bare_request("GET", "/appointments", &token))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(
        body["appointments"],
        json!([{"id": 1, "date": "1/1/2022", "time": "10:00", "pet_id": 1, "owner_id": 1}])
    );
}

#[tokio::test]
async fn list_appointments_empty_is_404() {
    let (app, _store) = build_app_with_jwks().await;
    let response = app
        .oneshot(bare_request("GET", "/appointments", &tech_token()))
        .await
        .expect("response");
    assert_eq!(
        read_json(response).await,
        expected_404("No appointments found")
    );
}

#[tokio::test]
async fn get_missing_appointment_is_404() {
    let (app, _store) = build_app_with_jwks().await;
    let response = app
        .oneshot(bare_request("GET", "/appointments/100", &tech_token()))
        .await
        .expect("response");
    assert_eq!(
        read_json(response).await,
        expected_404("Appointment not found")
    );
}

#[tokio::test]
async fn create_appointment_requires_all_fields() {
    let (app, _store) = build_app_with_jwks().await;
    let token = tech_token();
    let cases = [
        (
            json!({"date": "1/1/2022", "pet_id": 1, "owner_id": 1}),
            "Appointment must have a time",
        ),
        (
            json!({"time": "10:00", "pet_id": 1, "owner_id": 1}),
            "Appointment must have a date",
        ),
        (
            json!({"time": "10:00", "date": "1/1/2022", "owner_id": 1}),
            "Appointment must have a pet",
        ),
        (
            json!({"time": "10:00", "date": "1/1/2022", "pet_id": 1}),
            "Appointment must have an owner",
        ),
    ];
    for (body, message) in cases {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/appointments", &token, body))
            .await
            .expect("response");
        assert_eq!(read_json(response).await, expected_422(message));
    }
}

#[tokio::test]
async fn update_appointment_touches_only_date_and_time() {
    let (app, _store) = build_app_with_jwks().await;
    let token = tech_token();
    seed_pet_and_owner(&app, &token).await;
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/appointments",
            &token,
            json!({"time": "10:00", "date": "12/12/2021", "pet_id": 1, "owner_id": 1}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/appointments/1",
            &token,
            json!({"date": "1/10/2022"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(bare_request("GET", "/appointments/1", &token))
        .await
        .expect("response");
    let body = read_json(response).await;
    assert_eq!(
        body["appointment"],
        json!({"id": 1, "date": "1/10/2022", "time": "10:00", "pet_id": 1, "owner_id": 1})
    );
}

#[tokio::test]
async fn update_appointment_validation_errors() {
    let (app, _store) = build_app_with_jwks().await;
    let token = tech_token();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/appointments/300",
            &token,
            json!({"date": "1/10/2022"}),
        ))
        .await
        .expect("response");
    assert_eq!(
        read_json(response).await,
        expected_404("Can not update, appointment does not exist")
    );

    let response = app
        .clone()
        .oneshot(bare_request("PUT", "/appointments/1", &token))
        .await
        .expect("response");
    assert_eq!(
        read_json(response).await,
        expected_422("Request missing body")
    );

    let response = app
        .oneshot(json_request("PUT", "/appointments/1", &token, json!({})))
        .await
        .expect("response");
    assert_eq!(
        read_json(response).await,
        expected_422("Must include a value to update")
    );
}

#[tokio::test]
async fn delete_appointment_lifecycle() {
    let (app, _store) = build_app_with_jwks().await;
    let token = manager_token();
    seed_pet_and_owner(&app, &token).await;
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/appointments",
            &token,
            json!({"time": "10:00", "date": "12/12/2021", "pet_id": 1, "owner_id": 1}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(bare_request("DELETE", "/appointments/1", &token))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"success": true}));

    let response = app
        .clone()
        .oneshot(bare_request("DELETE", "/appointments/1", &token))
        .await
        .expect("response");
    assert_eq!(
        read_json(response).await,
        expected_404("Can not delete, appointment does not exist")
    );

    let response = app
        .oneshot(bare_request("DELETE", "/appointments/1", &tech_token()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
