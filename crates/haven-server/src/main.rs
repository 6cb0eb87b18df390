//! # haven-server
//!
//! HTTP server for the haven personal-safety location monitor.
//!
//! This binary provides:
//! - REST API for location ingestion, hazard designation, overlay state,
//!   risk state, and emergency escalation
//! - OpenAPI documentation at /api/openapi.json
//! - Structured logging to file and stdout
//!
//! ## Running
//!
//! ```bash
//! # Development
//! cargo run --package haven-server
//!
//! # Production
//! HAVEN_ENV=production ./haven-server
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

mod api;
mod logging;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let is_production = std::env::var("HAVEN_ENV").is_ok_and(|v| v == "production");

    // Initialize logging
    logging::init(is_production)?;

    info!("Starting haven-server");

    // Load configuration and wire the pipeline
    let state = state::AppState::new()?.shared();

    // Build the application router
    let app = api::create_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Bind to address
    let port = std::env::var("HAVEN_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
