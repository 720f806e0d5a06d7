//! Console API handlers.
use crate::api::error::{api_internal, api_not_found, api_unprocessable, ApiError};
use crate::api::types::{
    ConsoleCreateRequest, ConsoleListResponse, ConsoleResponse, ConsoleUpdateRequest,
    StatusResponse,
};
use crate::app::AppState;
use crate::model::{ConsoleUpdate, NewConsole};
use crate::store::StoreError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/consoles",
    tag = "consoles",
    responses(
        (status = 200, description = "List consoles", body = ConsoleListResponse),
        (status = 404, description = "No consoles exist", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_consoles(
    State(state): State<AppState>,
) -> Result<Json<ConsoleListResponse>, ApiError> {
    let consoles = state
        .store
        .list_consoles()
        .await
        .map_err(|err| api_internal("failed to list consoles", &err))?;
    if consoles.is_empty() {
        return Err(api_not_found("No consoles found"));
    }
    Ok(Json(ConsoleListResponse {
        success: true,
        consoles,
    }))
}

#[utoipa::path(
    post,
    path = "/consoles",
    tag = "consoles",
    request_body = ConsoleCreateRequest,
    responses(
        (status = 204, description = "Console created"),
        (status = 422, description = "Incomplete console", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_console(
    State(state): State<AppState>,
    Json(body): Json<ConsoleCreateRequest>,
) -> Result<StatusCode, ApiError> {
    let name = body
        .name
        .ok_or_else(|| api_unprocessable("Console must have a name"))?;
    state
        .store
        .create_console(NewConsole {
            name,
            company: body.company.unwrap_or_default(),
        })
        .await
        .map_err(|err| api_internal("failed to create console", &err))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/consoles/{id}",
    tag = "consoles",
    params(("id" = i64, Path, description = "Console identifier")),
    responses(
        (status = 200, description = "Console found", body = ConsoleResponse),
        (status = 404, description = "Console not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_console(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ConsoleResponse>, ApiError> {
    match state.store.get_console(id).await {
        Ok(console) => Ok(Json(ConsoleResponse {
            success: true,
            console,
        })),
        Err(StoreError::NotFound(_)) => Err(api_not_found("Console not found")),
        Err(err) => Err(api_internal("failed to load console", &err)),
    }
}

#[utoipa::path(
    put,
    path = "/consoles/{id}",
    tag = "consoles",
    params(("id" = i64, Path, description = "Console identifier")),
    request_body = ConsoleUpdateRequest,
    responses(
        (status = 200, description = "Console updated", body = StatusResponse),
        (status = 404, description = "Console not found", body = crate::api::types::ErrorResponse),
        (status = 422, description = "Nothing to update", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_console(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    body: Option<Json<ConsoleUpdateRequest>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Some(Json(body)) = body else {
        return Err(api_unprocessable("Request missing body"));
    };
    if body.name.is_none() && body.company.is_none() {
        return Err(api_unprocessable("Must include a value to update"));
    }
    let update = ConsoleUpdate {
        name: body.name,
        company: body.company,
    };
    match state.store.update_console(id, update).await {
        Ok(_) => Ok(Json(StatusResponse::ok())),
        Err(StoreError::NotFound(_)) => {
            Err(api_not_found("Can not update, console does not exist"))
        }
        Err(err) => Err(api_internal("failed to update console", &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/consoles/{id}",
    tag = "consoles",
    params(("id" = i64, Path, description = "Console identifier")),
    responses(
        (status = 200, description = "Console deleted", body = StatusResponse),
        (status = 404, description = "Console not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_console(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, ApiError> {
    match state.store.delete_console(id).await {
        Ok(()) => Ok(Json(StatusResponse::ok())),
        Err(StoreError::NotFound(_)) => {
            Err(api_not_found("Can not delete, console does not exist"))
        }
        Err(err) => Err(api_internal("failed to delete console", &err)),
    }
}
