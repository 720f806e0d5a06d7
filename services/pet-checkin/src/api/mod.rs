//! Check-in HTTP API module.
//!
//! # Purpose
//! Exposes the owner, pet, and appointment handler modules together with the
//! shared error helpers and payload types.
pub mod appointments;
pub mod error;
pub mod openapi;
pub mod owners;
pub mod pets;
pub mod types;
