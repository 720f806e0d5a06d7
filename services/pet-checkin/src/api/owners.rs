//! Owner API handlers.
//!
//! # Purpose
//! Implements owner CRUD with the fixed status/message pairs clients expect:
//! 404 for empty or missing records, 422 for incomplete input, and an inline
//! `delete-owners` check on DELETE over and above the route-level
//! authorization layer.
use crate::api::error::{api_forbidden, api_internal, api_not_found, api_unprocessable, ApiError};
use crate::api::types::{
    OwnerCreateRequest, OwnerListResponse, OwnerResponse, OwnerUpdateRequest, StatusResponse,
};
use crate::app::AppState;
use crate::auth::permissions::has_permission;
use crate::auth::verify::VerifiedClaims;
use crate::model::{NewOwner, OwnerUpdate};
use crate::store::StoreError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

#[utoipa::path(
    get,
    path = "/owners",
    tag = "owners",
    responses(
        (status = 200, description = "List owners", body = OwnerListResponse),
        (status = 404, description = "No owners exist", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_owners(
    State(state): State<AppState>,
) -> Result<Json<OwnerListResponse>, ApiError> {
    let owners = state
        .store
        .list_owners()
        .await
        .map_err(|err| api_internal("failed to list owners", &err))?;
    if owners.is_empty() {
        return Err(api_not_found("No owners found"));
    }
    Ok(Json(OwnerListResponse {
        success: true,
        owners,
    }))
}

#[utoipa::path(
    post,
    path = "/owners",
    tag = "owners",
    request_body = OwnerCreateRequest,
    responses(
        (status = 204, description = "Owner created"),
        (status = 422, description = "Incomplete owner", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_owner(
    State(state): State<AppState>,
    Json(body): Json<OwnerCreateRequest>,
) -> Result<StatusCode, ApiError> {
    let name = body
        .name
        .ok_or_else(|| api_unprocessable("Owner must have a name"))?;
    let phone = body
        .phone
        .ok_or_else(|| api_unprocessable("Owner must have a phone number"))?;
    state
        .store
        .create_owner(NewOwner { name, phone })
        .await
        .map_err(|err| api_internal("failed to create owner", &err))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/owners/{id}",
    tag = "owners",
    params(("id" = i64, Path, description = "Owner identifier")),
    responses(
        (status = 200, description = "Owner found", body = OwnerResponse),
        (status = 404, description = "Owner not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_owner(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<OwnerResponse>, ApiError> {
    match state.store.get_owner(id).await {
        Ok(owner) => Ok(Json(OwnerResponse {
            success: true,
            owner,
        })),
        Err(StoreError::NotFound(_)) => Err(api_not_found("Owner not found")),
        Err(err) => Err(api_internal("failed to load owner", &err)),
    }
}

#[utoipa::path(
    put,
    path = "/owners/{id}",
    tag = "owners",
    params(("id" = i64, Path, description = "Owner identifier")),
    request_body = OwnerUpdateRequest,
    responses(
        (status = 200, description = "Owner updated", body = StatusResponse),
        (status = 404, description = "Owner not found", body = crate::api::types::ErrorResponse),
        (status = 422, description = "Nothing to update", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_owner(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    body: Option<Json<OwnerUpdateRequest>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Some(Json(body)) = body else {
        return Err(api_unprocessable("Request missing body"));
    };
    if body.name.is_none() && body.phone.is_none() {
        return Err(api_unprocessable("Must include a value to update"));
    }
    let update = OwnerUpdate {
        name: body.name,
        phone: body.phone,
    };
    match state.store.update_owner(id, update).await {
        Ok(_) => Ok(Json(StatusResponse::ok())),
        Err(StoreError::NotFound(_)) => {
            Err(api_not_found("Can not update, owner does not exist"))
        }
        Err(err) => Err(api_internal("failed to update owner", &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/owners/{id}",
    tag = "owners",
    params(("id" = i64, Path, description = "Owner identifier")),
    responses(
        (status = 200, description = "Owner deleted", body = StatusResponse),
        (status = 403, description = "Caller may not delete", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Owner not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_owner(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(claims): Extension<VerifiedClaims>,
) -> Result<Json<StatusResponse>, ApiError> {
    // The route layer only proves the caller holds SOME permission on this
    // path; deletion additionally demands the exact delete capability.
    if !has_permission(&claims, "delete-owners") {
        return Err(api_forbidden("Permission not found."));
    }
    match state.store.delete_owner(id).await {
        Ok(()) => Ok(Json(StatusResponse::ok())),
        Err(StoreError::NotFound(_)) => {
            Err(api_not_found("Can not delete, owner does not exist"))
        }
        Err(err) => Err(api_internal("failed to delete owner", &err)),
    }
}
