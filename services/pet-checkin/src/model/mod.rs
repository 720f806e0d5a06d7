//! Pet check-in data model module.
//!
//! # Purpose
//! Re-exports the owner/pet/appointment records shared by the API and store
//! layers.
mod appointment;
mod owner;
mod pet;

pub use appointment::{Appointment, AppointmentUpdate, NewAppointment};
pub use owner::{NewOwner, Owner, OwnerUpdate};
pub use pet::{NewPet, Pet, PetUpdate};
