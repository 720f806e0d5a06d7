//! OpenAPI schema aggregation for the catalog API.
use crate::api::{
    consoles, games,
    types::{
        ConsoleCreateRequest, ConsoleListResponse, ConsoleResponse, ConsoleUpdateRequest,
        ErrorResponse, GameCreateRequest, GameListResponse, GameResponse, GameUpdateRequest,
        StatusResponse,
    },
};
use crate::model::{Console, Game};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "game-store",
        version = "v1",
        description = "Game store catalog HTTP API"
    ),
    paths(
        games::list_games,
        games::create_game,
        games::get_game,
        games::update_game,
        games::delete_game,
        consoles::list_consoles,
        consoles::create_console,
        consoles::get_console,
        consoles::update_console,
        consoles::delete_console
    ),
    components(schemas(
        ErrorResponse,
        StatusResponse,
        Game,
        GameCreateRequest,
        GameUpdateRequest,
        GameListResponse,
        GameResponse,
        Console,
        ConsoleCreateRequest,
        ConsoleUpdateRequest,
        ConsoleListResponse,
        ConsoleResponse
    )),
    tags(
        (name = "games", description = "Game catalog"),
        (name = "consoles", description = "Console catalog")
    )
)]
pub struct ApiDoc;
