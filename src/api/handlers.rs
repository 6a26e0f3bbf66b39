//! HTTP API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::config::Config;

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Author reported by `/health`.
    pub health_author: Arc<str>,
    /// Author reported by `/hello`.
    pub hello_author: Arc<str>,
}

impl AppState {
    /// Create new app state with the given author constants.
    pub fn new(health_author: impl Into<Arc<str>>, hello_author: impl Into<Arc<str>>) -> Self {
        Self {
            health_author: health_author.into(),
            hello_author: hello_author.into(),
        }
    }

    /// Build state from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.health_author.as_str(), config.hello_author.as_str())
    }
}

/// Body returned by both endpoints.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// "UP" for health, "OK" for hello.
    pub status: &'static str,
    /// Time the response was built, e.g. `2024-01-01T00:00:00.000Z`.
    pub timestamp: String,
    /// Configured author constant.
    pub author: String,
}

impl StatusResponse {
    fn now(status: &'static str, author: &str) -> Self {
        Self {
            status,
            timestamp: iso_timestamp(),
            author: author.to_string(),
        }
    }
}

/// Current UTC time with millisecond precision and a `Z` suffix.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Health check handler - always returns 200 with status "UP".
pub async fn health(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse::now("UP", &state.health_author))
}

/// Hello handler - always returns 200 with status "OK".
pub async fn hello(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse::now("OK", &state.hello_author))
}

/// Fallback for unknown paths and unsupported methods.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
