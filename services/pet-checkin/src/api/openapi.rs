//! OpenAPI schema aggregation for the check-in API.
//!
//! # Purpose
//! Collects all routes and schema types into a single OpenAPI document for
//! docs and client generation.
use crate::api::{
    appointments, owners, pets,
    types::{
        AppointmentCreateRequest, AppointmentListResponse, AppointmentResponse,
        AppointmentUpdateRequest, ErrorResponse, OwnerCreateRequest, OwnerListResponse,
        OwnerResponse, OwnerUpdateRequest, PetCreateRequest, PetListResponse, PetResponse,
        PetUpdateRequest, StatusResponse,
    },
};
use crate::model::{Appointment, Owner, Pet};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "pet-checkin",
        version = "v1",
        description = "Pet check-in HTTP API"
    ),
    paths(
        owners::list_owners,
        owners::create_owner,
        owners::get_owner,
        owners::update_owner,
        owners::delete_owner,
        pets::list_pets,
        pets::create_pet,
        pets::get_pet,
        pets::update_pet,
        pets::delete_pet,
        appointments::list_appointments,
        appointments::create_appointment,
        appointments::get_appointment,
        appointments::update_appointment,
        appointments::delete_appointment
    ),
    components(schemas(
        ErrorResponse,
        StatusResponse,
        Owner,
        OwnerCreateRequest,
        OwnerUpdateRequest,
        OwnerListResponse,
        OwnerResponse,
        Pet,
        PetCreateRequest,
        PetUpdateRequest,
        PetListResponse,
        PetResponse,
        Appointment,
        AppointmentCreateRequest,
        AppointmentUpdateRequest,
        AppointmentListResponse,
        AppointmentResponse
    )),
    tags(
        (name = "owners", description = "Owner management"),
        (name = "pets", description = "Pet management"),
        (name = "appointments", description = "Appointment scheduling")
    )
)]
pub struct ApiDoc;
