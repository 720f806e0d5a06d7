//! Appointment record definitions.
//!
//! # Purpose
//! Defines appointment rows linking an owner and a pet to a date/time slot.
//! Date and time are kept as strings; the service treats them as opaque
//! scheduling labels rather than parsed timestamps.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Appointment {
    pub id: i64,
    pub date: String,
    pub time: String,
    pub pet_id: i64,
    pub owner_id: i64,
}

/// Insert payload; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub date: String,
    pub time: String,
    pub pet_id: i64,
    pub owner_id: i64,
}

/// Partial update; only the date and time slots may change after booking.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct AppointmentUpdate {
    pub date: Option<String>,
    pub time: Option<String>,
}
