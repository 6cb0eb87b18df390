//! Location ingestion API endpoints.
//!
//! The sensing client (a browser geolocation watch or equivalent) posts each
//! position update and each sensor error here. Every accepted sample runs
//! the full classification pipeline: zone, score, risk persistence, and
//! overlay display.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use haven_core::{Coordinate, LocationSample, SensorErrorKind};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::{ApiError, ApiResult};
use crate::state::SharedState;

/// Creates the location router with all endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(ingest_sample))
        .route("/error", post(ingest_sensor_error))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// A position update from the sensing client.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({
    "latitude": 22.5645,
    "longitude": 72.9289,
    "accuracy_meters": 12.5,
    "speed_mps": 1.4,
    "altitude_meters": 31.0,
    "timestamp_ms": 1754550000000_i64
}))]
pub struct IngestSampleRequest {
    /// Latitude in decimal degrees.
    #[schema(example = 22.5645, minimum = -90.0, maximum = 90.0)]
    pub latitude: f64,

    /// Longitude in decimal degrees.
    #[schema(example = 72.9289, minimum = -180.0, maximum = 180.0)]
    pub longitude: f64,

    /// Reported horizontal accuracy in metres. Defaults to 20 m when absent.
    #[schema(example = 12.5, minimum = 0.0)]
    pub accuracy_meters: Option<f64>,

    /// Ground speed in metres per second, if known.
    pub speed_mps: Option<f64>,

    /// Altitude in metres, if known.
    pub altitude_meters: Option<f64>,

    /// Sample time as milliseconds since the Unix epoch.
    #[schema(example = 1754550000000_i64)]
    pub timestamp_ms: i64,
}

/// Classification result for an accepted sample.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "zone": "moderate",
    "score": 60,
    "color_hex": "#e9c46a",
    "overlay_shown": true
}))]
pub struct IngestSampleResponse {
    /// Classified safety zone.
    #[schema(example = "moderate")]
    pub zone: String,

    /// Safety score in `[0, 100]`.
    #[schema(example = 60)]
    pub score: u8,

    /// Display color for the map circle.
    #[schema(example = "#e9c46a")]
    pub color_hex: String,

    /// Whether this sample made the advisory overlay visible.
    #[schema(example = true)]
    pub overlay_shown: bool,
}

/// A sensor error report from the sensing client.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({ "kind": "permission_denied" }))]
pub struct SensorErrorRequest {
    /// The kind of sensor error.
    pub kind: SensorErrorKind,
}

/// Outcome of a sensor error report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "advisory": "Location permission is required for live monitoring. Enable location access in the browser settings.",
    "show_advisory": true
}))]
pub struct SensorErrorResponse {
    /// Advisory message to surface to the user, if any.
    pub advisory: Option<String>,

    /// Whether the client should display the advisory.
    #[schema(example = true)]
    pub show_advisory: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// Ingest one position sample.
///
/// Runs the classification pipeline and returns the computed zone and score.
#[utoipa::path(
    post,
    path = "/location",
    tag = "location",
    operation_id = "ingestSample",
    summary = "Ingest a position sample",
    description = "Classifies a position update against the designated hazard \
        zone and sensor accuracy, persists the resulting risk level and score, \
        and shows the advisory overlay on a transition into a non-safe zone. \
        Rejected with 409 while monitoring is paused.",
    request_body = IngestSampleRequest,
    responses(
        (status = 200, description = "Sample classified", body = IngestSampleResponse),
        (status = 409, description = "Monitoring is paused"),
        (status = 422, description = "Coordinate out of range")
    )
)]
pub async fn ingest_sample(
    State(state): State<SharedState>,
    Json(request): Json<IngestSampleRequest>,
) -> ApiResult<Json<IngestSampleResponse>> {
    let coordinate = Coordinate::validated(request.latitude, request.longitude)?;

    let sample = LocationSample {
        coordinate,
        accuracy_meters: request.accuracy_meters,
        speed_mps: request.speed_mps,
        altitude_meters: request.altitude_meters,
        timestamp_ms: request.timestamp_ms,
    };

    let mut state_guard = state.write().await;
    let outcome = state_guard
        .processor
        .on_sample(&sample)
        .ok_or_else(|| ApiError::Conflict {
            error_code: "monitoring_paused".to_string(),
            message: "Monitoring is paused; arm it before sending samples.".to_string(),
        })?;

    Ok(Json(IngestSampleResponse {
        zone: outcome.classification.zone.as_str().to_string(),
        score: outcome.classification.score,
        color_hex: outcome.classification.color.hex().to_string(),
        overlay_shown: outcome.overlay_shown.is_some(),
    }))
}

/// Report a sensor error.
///
/// Only a permission denial produces a user-facing advisory; other kinds are
/// logged and monitoring continues.
#[utoipa::path(
    post,
    path = "/location/error",
    tag = "location",
    operation_id = "reportSensorError",
    summary = "Report a sensor error",
    description = "Reports a geolocation error from the sensing client. \
        Returns an advisory message for permission denials; transient errors \
        are acknowledged silently.",
    request_body = SensorErrorRequest,
    responses(
        (status = 200, description = "Error processed", body = SensorErrorResponse)
    )
)]
pub async fn ingest_sensor_error(
    State(state): State<SharedState>,
    Json(request): Json<SensorErrorRequest>,
) -> Json<SensorErrorResponse> {
    let mut state_guard = state.write().await;
    let advisory = state_guard.processor.on_sensor_error(request.kind);

    Json(SensorErrorResponse {
        show_advisory: advisory.is_some(),
        advisory,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_request_deserialization() {
        let json = r#"{
            "latitude": 10.0,
            "longitude": 20.0,
            "accuracy_meters": 15.0,
            "timestamp_ms": 1754550000000
        }"#;
        let request: IngestSampleRequest = serde_json::from_str(json).unwrap();
        assert!((request.latitude - 10.0).abs() < f64::EPSILON);
        assert!(request.speed_mps.is_none());
    }

    #[test]
    fn test_sensor_error_request_deserialization() {
        let json = r#"{"kind": "permission_denied"}"#;
        let request: SensorErrorRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.kind, SensorErrorKind::PermissionDenied);
    }

    #[test]
    fn test_sample_response_serialization() {
        let response = IngestSampleResponse {
            zone: "danger".to_string(),
            score: 25,
            color_hex: "#e63946".to_string(),
            overlay_shown: true,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"zone\":\"danger\""));
        assert!(json.contains("\"score\":25"));
    }
}
