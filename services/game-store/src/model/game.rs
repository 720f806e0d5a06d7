//! Game record definitions.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub genre: String,
    pub console: String,
}

/// Insert payload; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub name: String,
    pub genre: String,
    pub console: String,
}

/// Partial update; only the provided fields change.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct GameUpdate {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub console: Option<String>,
}
