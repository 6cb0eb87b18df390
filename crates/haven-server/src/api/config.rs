//! Configuration API endpoints.
//!
//! Provides endpoints for reading configuration, arming or pausing the
//! monitoring gate, and adjusting the hazard designation radius.

use axum::extract::State;
use axum::routing::{get, put};
use axum::{Json, Router};
use haven_core::MonitoringState;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::{ApiError, ApiResult};
use crate::state::SharedState;

/// Creates the config router with all endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(get_config))
        .route("/monitoring", put(update_monitoring))
        .route("/hazard-radius", put(update_hazard_radius))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Current configuration response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "monitoring": "active",
    "hazard_radius_meters": 100.0,
    "sensor": {
        "high_accuracy": true,
        "maximum_age_ms": 30000,
        "timeout_ms": 10000
    },
    "map_fallback": { "latitude": 22.5645, "longitude": 72.9289 }
}))]
pub struct ConfigResponse {
    /// Current monitoring gate state.
    #[schema(example = "active")]
    pub monitoring: String,

    /// Radius applied to hazard designations, in metres.
    #[schema(example = 100.0)]
    pub hazard_radius_meters: f64,

    /// Geolocation watch options for the sensing client.
    pub sensor: SensorOptionsBody,

    /// Map center to show before the first position fix.
    pub map_fallback: MapFallbackBody,
}

/// Geolocation watch options.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "high_accuracy": true,
    "maximum_age_ms": 30000,
    "timeout_ms": 10000
}))]
pub struct SensorOptionsBody {
    /// Request the high-accuracy positioning mode.
    #[schema(example = true)]
    pub high_accuracy: bool,

    /// Maximum acceptable age of a cached position, in milliseconds.
    #[schema(example = 30000)]
    pub maximum_age_ms: u64,

    /// Time to wait for a position fix, in milliseconds.
    #[schema(example = 10000)]
    pub timeout_ms: u64,
}

/// Fallback map center.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "latitude": 22.5645, "longitude": 72.9289 }))]
pub struct MapFallbackBody {
    /// Latitude in decimal degrees.
    #[schema(example = 22.5645)]
    pub latitude: f64,

    /// Longitude in decimal degrees.
    #[schema(example = 72.9289)]
    pub longitude: f64,
}

/// Monitoring gate update.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({ "active": true }))]
pub struct UpdateMonitoringRequest {
    /// `true` to arm monitoring, `false` to pause it.
    #[schema(example = true)]
    pub active: bool,
}

/// Monitoring gate update result.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "monitoring": "active" }))]
pub struct UpdateMonitoringResponse {
    /// The new gate state.
    #[schema(example = "active")]
    pub monitoring: String,
}

/// Hazard radius update.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({ "radius_meters": 150.0 }))]
pub struct UpdateHazardRadiusRequest {
    /// New radius in metres. Must be positive and finite.
    #[schema(example = 150.0, exclusive_minimum = 0.0)]
    pub radius_meters: f64,
}

/// Hazard radius update result.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "hazard_radius_meters": 150.0 }))]
pub struct UpdateHazardRadiusResponse {
    /// The new radius in metres.
    #[schema(example = 150.0)]
    pub hazard_radius_meters: f64,
}

// ============================================================================
// Handlers
// ============================================================================

/// Get the current configuration.
#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    operation_id = "getConfig",
    summary = "Get the current configuration",
    responses(
        (status = 200, description = "Configuration retrieved", body = ConfigResponse)
    )
)]
pub async fn get_config(State(state): State<SharedState>) -> Json<ConfigResponse> {
    let state_guard = state.read().await;
    let config = &state_guard.config;

    Json(ConfigResponse {
        monitoring: state_guard.processor.monitoring().as_str().to_string(),
        hazard_radius_meters: config.monitor.hazard_radius_meters,
        sensor: SensorOptionsBody {
            high_accuracy: config.sensor.high_accuracy,
            maximum_age_ms: config.sensor.maximum_age_ms,
            timeout_ms: config.sensor.timeout_ms,
        },
        map_fallback: MapFallbackBody {
            latitude: config.map.fallback_latitude,
            longitude: config.map.fallback_longitude,
        },
    })
}

/// Arm or pause the monitoring gate.
///
/// Sample ingestion only runs while the gate is active.
#[utoipa::path(
    put,
    path = "/config/monitoring",
    tag = "config",
    operation_id = "updateMonitoring",
    summary = "Arm or pause monitoring",
    description = "Controls the process-wide monitoring gate. While paused, \
        posted samples are rejected and no classification runs.",
    request_body = UpdateMonitoringRequest,
    responses(
        (status = 200, description = "Gate updated", body = UpdateMonitoringResponse)
    )
)]
pub async fn update_monitoring(
    State(state): State<SharedState>,
    Json(request): Json<UpdateMonitoringRequest>,
) -> Json<UpdateMonitoringResponse> {
    let new_state = if request.active {
        MonitoringState::Active
    } else {
        MonitoringState::Paused
    };

    let mut state_guard = state.write().await;
    state_guard.processor.set_monitoring(new_state);

    Json(UpdateMonitoringResponse {
        monitoring: new_state.as_str().to_string(),
    })
}

/// Update the hazard designation radius.
///
/// Affects future designations only; an already designated zone keeps its
/// radius until replaced.
#[utoipa::path(
    put,
    path = "/config/hazard-radius",
    tag = "config",
    operation_id = "updateHazardRadius",
    summary = "Update the hazard designation radius",
    request_body = UpdateHazardRadiusRequest,
    responses(
        (status = 200, description = "Radius updated", body = UpdateHazardRadiusResponse),
        (status = 400, description = "Non-positive radius")
    )
)]
pub async fn update_hazard_radius(
    State(state): State<SharedState>,
    Json(request): Json<UpdateHazardRadiusRequest>,
) -> ApiResult<Json<UpdateHazardRadiusResponse>> {
    if !request.radius_meters.is_finite() || request.radius_meters <= 0.0 {
        return Err(ApiError::BadRequest {
            error_code: "invalid_radius".to_string(),
            message: format!("Radius must be positive, got {}", request.radius_meters),
        });
    }

    let mut state_guard = state.write().await;
    state_guard.config.monitor.hazard_radius_meters = request.radius_meters;
    state_guard.processor.set_hazard_radius(request.radius_meters);

    // Persist the change; an unwritable config dir degrades to in-memory only.
    let config_path = state_guard.config_path.clone();
    if let Err(e) = state_guard.config.save(&config_path) {
        tracing::warn!(error = %e, "failed to persist configuration update");
    }

    Ok(Json(UpdateHazardRadiusResponse {
        hazard_radius_meters: request.radius_meters,
    }))
}
