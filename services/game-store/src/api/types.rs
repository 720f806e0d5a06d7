//! Request and response payload types for the catalog API.
//!
//! Success bodies always carry `"success": true`; failures use
//! [`ErrorResponse`] with the numeric status echoed in `error`. Create and
//! update payloads keep every field optional so handlers can report the
//! exact missing field instead of a generic deserialization error.
use crate::model::{Console, Game};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body: `{"success": false, "error": <status>, "message": <text>}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

/// Bare success acknowledgement for mutations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub success: bool,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GameListResponse {
    pub success: bool,
    pub games: Vec<Game>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GameResponse {
    pub success: bool,
    pub game: Game,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GameCreateRequest {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub console: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GameUpdateRequest {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub console: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConsoleListResponse {
    pub success: bool,
    pub consoles: Vec<Console>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConsoleResponse {
    pub success: bool,
    pub console: Console,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConsoleCreateRequest {
    pub name: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConsoleUpdateRequest {
    pub name: Option<String>,
    pub company: Option<String>,
}
