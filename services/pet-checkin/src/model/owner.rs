//! Owner record definitions.
//!
//! # Purpose
//! Defines the owner rows stored by the check-in service and the payload used
//! when inserting a new owner.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Owner {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

/// Insert payload; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewOwner {
    pub name: String,
    pub phone: String,
}

/// Partial update; only the provided fields change.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct OwnerUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
}
