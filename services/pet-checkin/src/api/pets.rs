//! Pet API handlers.
//!
//! Same contract shape as the owner endpoints; `breed` is optional on
//! create and defaults to an empty string.
use crate::api::error::{api_forbidden, api_internal, api_not_found, api_unprocessable, ApiError};
use crate::api::types::{
    PetCreateRequest, PetListResponse, PetResponse, PetUpdateRequest, StatusResponse,
};
use crate::app::AppState;
use crate::auth::permissions::has_permission;
use crate::auth::verify::VerifiedClaims;
use crate::model::{NewPet, PetUpdate};
use crate::store::StoreError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

#[utoipa::path(
    get,
    path = "/pets",
    tag = "pets",
    responses(
        (status = 200, description = "List pets", body = PetListResponse),
        (status = 404, description = "No pets exist", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_pets(
    State(state): State<AppState>,
) -> Result<Json<PetListResponse>, ApiError> {
    let pets = state
        .store
        .list_pets()
        .await
        .map_err(|err| api_internal("failed to list pets", &err))?;
    if pets.is_empty() {
        return Err(api_not_found("No pets found"));
    }
    Ok(Json(PetListResponse {
        success: true,
        pets,
    }))
}

#[utoipa::path(
    post,
    path = "/pets",
    tag = "pets",
    request_body = PetCreateRequest,
    responses(
        (status = 204, description = "Pet created"),
        (status = 422, description = "Incomplete pet", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_pet(
    State(state): State<AppState>,
    Json(body): Json<PetCreateRequest>,
) -> Result<StatusCode, ApiError> {
    let name = body
        .name
        .ok_or_else(|| api_unprocessable("Pet must have a name"))?;
    let species = body
        .species
        .ok_or_else(|| api_unprocessable("Pet must have a species"))?;
    let breed = body.breed.unwrap_or_default();
    state
        .store
        .create_pet(NewPet {
            name,
            species,
            breed,
        })
        .await
        .map_err(|err| api_internal("failed to create pet", &err))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/pets/{id}",
    tag = "pets",
    params(("id" = i64, Path, description = "Pet identifier")),
    responses(
        (status = 200, description = "Pet found", body = PetResponse),
        (status = 404, description = "Pet not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_pet(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<PetResponse>, ApiError> {
    match state.store.get_pet(id).await {
        Ok(pet) => Ok(Json(PetResponse { success: true, pet })),
        Err(StoreError::NotFound(_)) => Err(api_not_found("Pet not found")),
        Err(err) => Err(api_internal("failed to load pet", &err)),
    }
}

#[utoipa::path(
    put,
    path = "/pets/{id}",
    tag = "pets",
    params(("id" = i64, Path, description = "Pet identifier")),
    request_body = PetUpdateRequest,
    responses(
        (status = 200, description = "Pet updated", body = StatusResponse),
        (status = 404, description = "Pet not found", body = crate::api::types::ErrorResponse),
        (status = 422, description = "Nothing to update", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_pet(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    body: Option<Json<PetUpdateRequest>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Some(Json(body)) = body else {
        return Err(api_unprocessable("Request missing body"));
    };
    if body.name.is_none() && body.species.is_none() && body.breed.is_none() {
        return Err(api_unprocessable("Must include a value to update"));
    }
    let update = PetUpdate {
        name: body.name,
        species: body.species,
        breed: body.breed,
    };
    match state.store.update_pet(id, update).await {
        Ok(_) => Ok(Json(StatusResponse::ok())),
        Err(StoreError::NotFound(_)) => Err(api_not_found("Can not update, pet does not exist")),
        Err(err) => Err(api_internal("failed to update pet", &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/pets/{id}",
    tag = "pets",
    params(("id" = i64, Path, description = "Pet identifier")),
    responses(
        (status = 200, description = "Pet deleted", body = StatusResponse),
        (status = 403, description = "Caller may not delete", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Pet not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_pet(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(claims): Extension<VerifiedClaims>,
) -> Result<Json<StatusResponse>, ApiError> {
    if !has_permission(&claims, "delete-pets") {
        return Err(api_forbidden("Permission not found."));
    }
    match state.store.delete_pet(id).await {
        Ok(()) => Ok(Json(StatusResponse::ok())),
        Err(StoreError::NotFound(_)) => Err(api_not_found("Can not delete, pet does not exist")),
        Err(err) => Err(api_internal("failed to delete pet", &err)),
    }
}
