//! Authentication and authorization modules for the check-in service.
//!
//! # Purpose
//! Groups bearer-token extraction, JWKS resolution, JWT verification,
//! permission checks, and the per-route authorization middleware.
pub mod error;
pub mod jwks;
pub mod middleware;
pub mod permissions;
pub mod verify;
