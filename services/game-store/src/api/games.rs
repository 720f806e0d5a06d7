//! Game API handlers.
//!
//! Game CRUD with the fixed status/message pairs clients expect: 404 for
//! empty or missing records, 422 for incomplete input. Only `name` is
//! required on create; `genre` and `console` default to the empty string.
use crate::api::error::{api_internal, api_not_found, api_unprocessable, ApiError};
use crate::api::types::{
    GameCreateRequest, GameListResponse, GameResponse, GameUpdateRequest, StatusResponse,
};
use crate::app::AppState;
use crate::model::{GameUpdate, NewGame};
use crate::store::StoreError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/games",
    tag = "games",
    responses(
        (status = 200, description = "List games", body = GameListResponse),
        (status = 404, description = "No games exist", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_games(
    State(state): State<AppState>,
) -> Result<Json<GameListResponse>, ApiError> {
    let games = state
        .store
        .list_games()
        .await
        .map_err(|err| api_internal("failed to list games", &err))?;
    if games.is_empty() {
        return Err(api_not_found("No games found"));
    }
    Ok(Json(GameListResponse {
        success: true,
        games,
    }))
}

#[utoipa::path(
    post,
    path = "/games",
    tag = "games",
    request_body = GameCreateRequest,
    responses(
        (status = 204, description = "Game created"),
        (status = 422, description = "Incomplete game", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_game(
    State(state): State<AppState>,
    Json(body): Json<GameCreateRequest>,
) -> Result<StatusCode, ApiError> {
    let name = body
        .name
        .ok_or_else(|| api_unprocessable("Game must have a name"))?;
    state
        .store
        .create_game(NewGame {
            name,
            genre: body.genre.unwrap_or_default(),
            console: body.console.unwrap_or_default(),
        })
        .await
        .map_err(|err| api_internal("failed to create game", &err))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/games/{id}",
    tag = "games",
    params(("id" = i64, Path, description = "Game identifier")),
    responses(
        (status = 200, description = "Game found", body = GameResponse),
        (status = 404, description = "Game not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_game(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<GameResponse>, ApiError> {
    match state.store.get_game(id).await {
        Ok(game) => Ok(Json(GameResponse {
            success: true,
            game,
        })),
        Err(StoreError::NotFound(_)) => Err(api_not_found("Game not found")),
        Err(err) => Err(api_internal("failed to load game", &err)),
    }
}

#[utoipa::path(
    put,
    path = "/games/{id}",
    tag = "games",
    params(("id" = i64, Path, description = "Game identifier")),
    request_body = GameUpdateRequest,
    responses(
        (status = 200, description = "Game updated", body = StatusResponse),
        (status = 404, description = "Game not found", body = crate::api::types::ErrorResponse),
        (status = 422, description = "Nothing to update", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_game(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    body: Option<Json<GameUpdateRequest>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Some(Json(body)) = body else {
        return Err(api_unprocessable("Request missing body"));
    };
    if body.name.is_none() && body.genre.is_none() && body.console.is_none() {
        return Err(api_unprocessable("Must include a value to update"));
    }
    let update = GameUpdate {
        name: body.name,
        genre: body.genre,
        console: body.console,
    };
    match state.store.update_game(id, update).await {
        Ok(_) => Ok(Json(StatusResponse::ok())),
        Err(StoreError::NotFound(_)) => Err(api_not_found("Can not update, game does not exist")),
        Err(err) => Err(api_internal("failed to update game", &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/games/{id}",
    tag = "games",
    params(("id" = i64, Path, description = "Game identifier")),
    responses(
        (status = 200, description = "Game deleted", body = StatusResponse),
        (status = 404, description = "Game not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_game(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, ApiError> {
    match state.store.delete_game(id).await {
        Ok(()) => Ok(Json(StatusResponse::ok())),
        Err(StoreError::NotFound(_)) => Err(api_not_found("Can not delete, game does not exist")),
        Err(err) => Err(api_internal("failed to delete game", &err)),
    }
}
