//! Pet record definitions.
//!
//! # Purpose
//! Defines pet rows and the insert payload. `breed` is optional in the API
//! and defaults to an empty string, matching the check-in intake form.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub species: String,
    pub breed: String,
}

/// Insert payload; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPet {
    pub name: String,
    pub species: String,
    pub breed: String,
}

/// Partial update; only the provided fields change.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct PetUpdate {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
}
