//! HTTP API module for the health and hello endpoints.

pub mod handlers;
pub mod routes;
pub mod security;

pub use handlers::{AppState, StatusResponse};
pub use routes::create_router;
