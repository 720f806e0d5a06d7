//! Console record definitions.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Console {
    pub id: i64,
    pub name: String,
    pub company: String,
}

/// Insert payload; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewConsole {
    pub name: String,
    pub company: String,
}

/// Partial update; only the provided fields change.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct ConsoleUpdate {
    pub name: Option<String>,
    pub company: Option<String>,
}
