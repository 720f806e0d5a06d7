//! Request and response payload types for the check-in API.
//!
//! Success bodies always carry `"success": true`; failures use
//! [`ErrorResponse`] with the numeric status echoed in `error`. Create and
//! update payloads keep every field optional so handlers can report the
//! exact missing field instead of a generic deserialization error.
use crate::model::{Appointment, Owner, Pet};
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
pub struct OwnerListResponse {
    pub success: bool,
    pub owners: Vec<Owner>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OwnerResponse {
    pub success: bool,
    pub owner: Owner,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OwnerCreateRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OwnerUpdateRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PetListResponse {
    pub success: bool,
    pub pets: Vec<Pet>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PetResponse {
    pub success: bool,
    pub pet: Pet,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PetCreateRequest {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PetUpdateRequest {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AppointmentListResponse {
    pub success: bool,
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AppointmentResponse {
    pub success: bool,
    pub appointment: Appointment,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AppointmentCreateRequest {
    pub date: Option<String>,
    pub time: Option<String>,
    pub pet_id: Option<i64>,
    pub owner_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AppointmentUpdateRequest {
    pub date: Option<String>,
    pub time: Option<String>,
}
