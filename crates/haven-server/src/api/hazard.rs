//! Hazard zone API endpoints.
//!
//! The operator designates a hazard zone by clicking the map; the client
//! posts the clicked coordinate here. At most one zone exists and each
//! designation replaces the previous one.

use axum::extract::State;
use axum::routing::put;
use axum::{Json, Router};
use haven_core::Coordinate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::ApiResult;
use crate::state::SharedState;

/// Creates the hazard router with all endpoints.
pub fn router() -> Router<SharedState> {
    Router::new().route(
        "/",
        put(designate_hazard).get(get_hazard).delete(clear_hazard),
    )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Operator designation of a hazard zone center.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({ "latitude": 22.5645, "longitude": 72.9289 }))]
pub struct DesignateHazardRequest {
    /// Latitude of the zone center.
    #[schema(example = 22.5645, minimum = -90.0, maximum = 90.0)]
    pub latitude: f64,

    /// Longitude of the zone center.
    #[schema(example = 72.9289, minimum = -180.0, maximum = 180.0)]
    pub longitude: f64,
}

/// The designated hazard zone.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "latitude": 22.5645,
    "longitude": 72.9289,
    "radius_meters": 100.0
}))]
pub struct HazardZoneBody {
    /// Latitude of the zone center.
    #[schema(example = 22.5645)]
    pub latitude: f64,

    /// Longitude of the zone center.
    #[schema(example = 72.9289)]
    pub longitude: f64,

    /// Zone radius in metres.
    #[schema(example = 100.0)]
    pub radius_meters: f64,
}

/// Current hazard zone status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "designated": true,
    "zone": { "latitude": 22.5645, "longitude": 72.9289, "radius_meters": 100.0 }
}))]
pub struct HazardStatusResponse {
    /// Whether a hazard zone is currently designated.
    #[schema(example = true)]
    pub designated: bool,

    /// The zone, when designated.
    pub zone: Option<HazardZoneBody>,
}

/// Result of clearing the hazard zone.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "cleared": true }))]
pub struct ClearHazardResponse {
    /// Whether a zone existed and was removed.
    #[schema(example = true)]
    pub cleared: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// Designate the hazard zone.
///
/// Replaces any existing zone with one centered on the given coordinate at
/// the configured radius.
#[utoipa::path(
    put,
    path = "/hazard",
    tag = "hazard",
    operation_id = "designateHazard",
    summary = "Designate the hazard zone",
    description = "Replaces any existing hazard zone with one centered on the \
        given coordinate. The radius comes from configuration (100 m by \
        default). Only subsequent samples are affected.",
    request_body = DesignateHazardRequest,
    responses(
        (status = 200, description = "Zone designated", body = HazardZoneBody),
        (status = 422, description = "Coordinate out of range")
    )
)]
pub async fn designate_hazard(
    State(state): State<SharedState>,
    Json(request): Json<DesignateHazardRequest>,
) -> ApiResult<Json<HazardZoneBody>> {
    let center = Coordinate::validated(request.latitude, request.longitude)?;

    let mut state_guard = state.write().await;
    let zone = state_guard.processor.designate_hazard(center);

    Ok(Json(HazardZoneBody {
        latitude: zone.center.latitude,
        longitude: zone.center.longitude,
        radius_meters: zone.radius_meters,
    }))
}

/// Get the current hazard zone.
#[utoipa::path(
    get,
    path = "/hazard",
    tag = "hazard",
    operation_id = "getHazard",
    summary = "Get the current hazard zone",
    responses(
        (status = 200, description = "Current status", body = HazardStatusResponse)
    )
)]
pub async fn get_hazard(State(state): State<SharedState>) -> Json<HazardStatusResponse> {
    let state_guard = state.read().await;
    let zone = state_guard.processor.hazard().map(|z| HazardZoneBody {
        latitude: z.center.latitude,
        longitude: z.center.longitude,
        radius_meters: z.radius_meters,
    });

    Json(HazardStatusResponse {
        designated: zone.is_some(),
        zone,
    })
}

/// Clear the hazard zone.
#[utoipa::path(
    delete,
    path = "/hazard",
    tag = "hazard",
    operation_id = "clearHazard",
    summary = "Clear the hazard zone",
    responses(
        (status = 200, description = "Clear processed", body = ClearHazardResponse)
    )
)]
pub async fn clear_hazard(State(state): State<SharedState>) -> Json<ClearHazardResponse> {
    let mut state_guard = state.write().await;
    Json(ClearHazardResponse {
        cleared: state_guard.processor.clear_hazard(),
    })
}
