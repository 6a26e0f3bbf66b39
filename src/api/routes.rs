//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{health, hello, not_found, AppState};
use super::security;

/// Create the API router.
///
/// Only `GET` (and the implied `HEAD`) is routed; any other method on a
/// known path is answered like an unknown path, with 404.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health).fallback(not_found))
        .route("/hello", get(hello).fallback(not_found))
        .fallback(not_found)
        .with_state(state);

    security::harden(router).layer(TraceLayer::new_for_http())
}
