//! Minimal health/hello HTTP service.
//!
//! Two fixed endpoints answer with a small JSON document:
//!
//! ```text
//! GET /health  ->  {"status":"UP","timestamp":"2024-01-01T00:00:00.000Z","author":"..."}
//! GET /hello   ->  {"status":"OK","timestamp":"2024-01-01T00:00:00.000Z","author":"..."}
//! ```
//!
//! Everything else is a 404. Every response carries a baseline set of
//! security headers.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: Handlers, routes and security headers
//! - [`server`]: Listener bind and serve loop

pub mod api;
pub mod config;
pub mod error;
pub mod server;

pub use config::Config;
pub use error::{Result, ServiceError};
