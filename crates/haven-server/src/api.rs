//! HTTP API routes and handlers.
//!
//! This module contains all HTTP endpoint implementations organized by domain:
//! - `location` - Position sample and sensor error ingestion
//! - `hazard` - Operator hazard zone designation
//! - `overlay` - Advisory overlay state and dismissal
//! - `risk` - Persisted risk state
//! - `sos` - Emergency escalation
//! - `config` - Monitoring gate and pipeline configuration
//! - `system` - System status
//! - `health` - Service health checks
//! - `error` - API error types
//! - `openapi` - OpenAPI specification generation

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub mod config;
pub mod error;
pub mod hazard;
pub mod health;
pub mod location;
pub mod openapi;
pub mod overlay;
pub mod risk;
pub mod sos;
pub mod system;

// Re-export commonly used types
#[allow(unused_imports)]
pub use error::{ApiError, ApiResult, ErrorResponse};

// Re-export OpenAPI utilities for the gen-openapi binary
#[allow(unused_imports)]
pub use openapi::get_openapi_json;

/// Creates the combined API router with all endpoints.
///
/// # Route Structure
///
/// ```text
/// /health                - Health check
/// /api
/// ├── /location          - Sample and sensor error ingestion
/// ├── /hazard            - Hazard zone designation
/// ├── /overlay           - Overlay state and dismissal
/// ├── /risk              - Persisted risk state
/// ├── /sos               - Emergency escalation
/// ├── /config            - Gate and pipeline configuration
/// ├── /system            - System status
/// └── /openapi.json      - OpenAPI specification
/// ```
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .nest("/health", health::router())
        .nest(
            "/api",
            Router::new()
                // OpenAPI spec at /api/openapi.json
                .route("/openapi.json", get(openapi::get_openapi_spec))
                // Location ingestion
                .nest("/location", location::router())
                // Hazard designation
                .nest("/hazard", hazard::router())
                // Overlay state
                .nest("/overlay", overlay::router())
                // Persisted risk state
                .nest("/risk", risk::router())
                // Escalation
                .nest("/sos", sos::router())
                // Configuration
                .nest("/config", config::router())
                // System status
                .nest("/system", system::router()),
        )
        .with_state(state)
}
