//! OpenAPI specification generation for the haven API.
//!
//! This module generates an OpenAPI 3.0 specification consumed by the web
//! client for typed API access. Descriptions are written to be understood by
//! both human developers and tooling.

use axum::Json;
use utoipa::OpenApi;

// Import all the handler modules to reference their types
use super::config::{
    ConfigResponse, MapFallbackBody, SensorOptionsBody, UpdateHazardRadiusRequest,
    UpdateHazardRadiusResponse, UpdateMonitoringRequest, UpdateMonitoringResponse,
};
use super::error::ErrorResponse;
use super::hazard::{
    ClearHazardResponse, DesignateHazardRequest, HazardStatusResponse, HazardZoneBody,
};
use super::health::HealthResponse;
use super::location::{
    IngestSampleRequest, IngestSampleResponse, SensorErrorRequest, SensorErrorResponse,
};
use super::overlay::{DismissOverlayResponse, OverlayResponse};
use super::risk::RiskResponse;
use super::sos::{EscalationRequest, EscalationResponse};
use super::system::{LastSampleBody, SystemStatusResponse};

/// Serve the OpenAPI specification as JSON.
///
/// This endpoint is available at `/api/openapi.json` and returns the complete
/// OpenAPI 3.0 specification for the haven API.
pub async fn get_openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Returns the OpenAPI specification as a string (for writing to file).
/// Used by the gen-openapi binary.
#[allow(dead_code)]
pub fn get_openapi_json() -> String {
    ApiDoc::openapi()
        .to_pretty_json()
        .expect("Failed to serialize OpenAPI spec")
}

/// Main OpenAPI document structure for haven.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "haven API",
        version = "0.1.0",
        description = r#"
# haven API

haven continuously classifies a user's safety state from live location
samples and an operator-designated hazard zone.

## Overview

This API is the event boundary of the safety pipeline:

1. **Location ingestion**: the sensing client posts each position update and
   sensor error.
2. **Hazard designation**: the operator designates a single replaceable
   hazard zone from the map.
3. **Advisory overlay**: the rendering client polls the overlay state and
   posts user dismissals.
4. **Escalation**: the SOS button records a reason and forces the
   maximum-risk state.

## Design notes

- Classification is synchronous: the response to a posted sample carries the
  computed zone and score.
- Events are processed strictly serially; there is no queuing.
- The overlay never updates its copy while visible; dismissal is the only
  way out.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local haven server")
    ),
    tags(
        (
            name = "system",
            description = "Health checks and system status"
        ),
        (
            name = "location",
            description = "Position sample and sensor error ingestion"
        ),
        (
            name = "hazard",
            description = "Operator hazard zone designation"
        ),
        (
            name = "overlay",
            description = "Advisory overlay state and dismissal"
        ),
        (
            name = "risk",
            description = "Persisted risk state"
        ),
        (
            name = "sos",
            description = "Emergency escalation"
        ),
        (
            name = "config",
            description = "Monitoring gate and pipeline configuration"
        )
    ),
    paths(
        // Health endpoints
        super::health::health_check,
        // Location endpoints
        super::location::ingest_sample,
        super::location::ingest_sensor_error,
        // Hazard endpoints
        super::hazard::designate_hazard,
        super::hazard::get_hazard,
        super::hazard::clear_hazard,
        // Overlay endpoints
        super::overlay::get_overlay,
        super::overlay::dismiss_overlay,
        // Risk endpoints
        super::risk::get_risk,
        // Escalation endpoints
        super::sos::trigger_escalation,
        // Config endpoints
        super::config::get_config,
        super::config::update_monitoring,
        super::config::update_hazard_radius,
        // System endpoints
        super::system::get_status,
    ),
    components(
        schemas(
            // Error types
            ErrorResponse,
            // Health types
            HealthResponse,
            // Location types
            IngestSampleRequest,
            IngestSampleResponse,
            SensorErrorRequest,
            SensorErrorResponse,
            // Hazard types
            DesignateHazardRequest,
            HazardZoneBody,
            HazardStatusResponse,
            ClearHazardResponse,
            // Overlay types
            OverlayResponse,
            DismissOverlayResponse,
            // Risk types
            RiskResponse,
            // Escalation types
            EscalationRequest,
            EscalationResponse,
            // Config types
            ConfigResponse,
            SensorOptionsBody,
            MapFallbackBody,
            UpdateMonitoringRequest,
            UpdateMonitoringResponse,
            UpdateHazardRadiusRequest,
            UpdateHazardRadiusResponse,
            // System types
            SystemStatusResponse,
            LastSampleBody,
        )
    )
)]
pub struct ApiDoc;
