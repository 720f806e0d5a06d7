pub mod api;
pub mod app;
pub mod config;
pub mod model;
pub mod observability;
pub mod store;
