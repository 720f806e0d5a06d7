//! Appointment API handlers.
//!
//! Appointments reference a pet and an owner by id; updates only ever touch
//! the date and time.
use crate::api::error::{api_forbidden, api_internal, api_not_found, api_unprocessable, ApiError};
use crate::api::types::{
    AppointmentCreateRequest, AppointmentListResponse, AppointmentResponse,
    AppointmentUpdateRequest, StatusResponse,
};
use crate::app::AppState;
use crate::auth::permissions::has_permission;
use crate::auth::verify::VerifiedClaims;
use crate::model::{AppointmentUpdate, NewAppointment};
use crate::store::StoreError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

#[utoipa::path(
    get,
    path = "/appointments",
    tag = "appointments",
    responses(
        (status = 200, description = "List appointments", body = AppointmentListResponse),
        (status = 404, description = "No appointments exist", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_appointments(
    State(state): State<AppState>,
) -> Result<Json<AppointmentListResponse>, ApiError> {
    let appointments = state
        .store
        .list_appointments()
        .await
        .map_err(|err| api_internal("failed to list appointments", &err))?;
    if appointments.is_empty() {
        return Err(api_not_found("No appointments found"));
    }
    Ok(Json(AppointmentListResponse {
        success: true,
        appointments,
    }))
}

#[utoipa::path(
    post,
    path = "/appointments",
    tag = "appointments",
    request_body = AppointmentCreateRequest,
    responses(
        (status = 204, description = "Appointment created"),
        (status = 422, description = "Incomplete appointment", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_appointment(
    State(state): State<AppState>,
    Json(body): Json<AppointmentCreateRequest>,
) -> Result<StatusCode, ApiError> {
    let time = body
        .time
        .ok_or_else(|| api_unprocessable("Appointment must have a time"))?;
    let date = body
        .date
        .ok_or_else(|| api_unprocessable("Appointment must have a date"))?;
    let pet_id = body
        .pet_id
        .ok_or_else(|| api_unprocessable("Appointment must have a pet"))?;
    let owner_id = body
        .owner_id
        .ok_or_else(|| api_unprocessable("Appointment must have an owner"))?;
    state
        .store
        .create_appointment(NewAppointment {
            date,
            time,
            pet_id,
            owner_id,
        })
        .await
        .map_err(|err| api_internal("failed to create appointment", &err))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/appointments/{id}",
    tag = "appointments",
    params(("id" = i64, Path, description = "Appointment identifier")),
    responses(
        (status = 200, description = "Appointment found", body = AppointmentResponse),
        (status = 404, description = "Appointment not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_appointment(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    match state.store.get_appointment(id).await {
        Ok(appointment) => Ok(Json(AppointmentResponse {
            success: true,
            appointment,
        })),
        Err(StoreError::NotFound(_)) => Err(api_not_found("Appointment not found")),
        Err(err) => Err(api_internal("failed to load appointment", &err)),
    }
}

#[utoipa::path(
    put,
    path = "/appointments/{id}",
    tag = "appointments",
    params(("id" = i64, Path, description = "Appointment identifier")),
    request_body = AppointmentUpdateRequest,
    responses(
        (status = 200, description = "Appointment updated", body = StatusResponse),
        (status = 404, description = "Appointment not found", body = crate::api::types::ErrorResponse),
        (status = 422, description = "Nothing to update", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_appointment(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    body: Option<Json<AppointmentUpdateRequest>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Some(Json(body)) = body else {
        return Err(api_unprocessable("Request missing body"));
    };
    if body.date.is_none() && body.time.is_none() {
        return Err(api_unprocessable("Must include a value to update"));
    }
    let update = AppointmentUpdate {
        date: body.date,
        time: body.time,
    };
    match state.store.update_appointment(id, update).await {
        Ok(_) => Ok(Json(StatusResponse::ok())),
        Err(StoreError::NotFound(_)) => {
            Err(api_not_found("Can not update, appointment does not exist"))
        }
        Err(err) => Err(api_internal("failed to update appointment", &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/appointments/{id}",
    tag = "appointments",
    params(("id" = i64, Path, description = "Appointment identifier")),
    responses(
        (status = 200, description = "Appointment deleted", body = StatusResponse),
        (status = 403, description = "Caller may not delete", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Appointment not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_appointment(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(claims): Extension<VerifiedClaims>,
) -> Result<Json<StatusResponse>, ApiError> {
    if !has_permission(&claims, "delete-appointments") {
        return Err(api_forbidden("Permission not found."));
    }
    match state.store.delete_appointment(id).await {
        Ok(()) => Ok(Json(StatusResponse::ok())),
        Err(StoreError::NotFound(_)) => {
            Err(api_not_found("Can not delete, appointment does not exist"))
        }
        Err(err) => Err(api_internal("failed to delete appointment", &err)),
    }
}
