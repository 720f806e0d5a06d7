//! HTTP API surface of the catalog service.
pub mod consoles;
pub mod error;
pub mod games;
pub mod openapi;
pub mod types;
