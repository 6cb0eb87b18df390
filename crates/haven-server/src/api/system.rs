//! System API endpoints.
//!
//! Provides the system status surface: version, uptime, monitoring gate,
//! hazard presence, escalation latch, and the diagnostics retained from the
//! last processed sample.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::SharedState;

/// Creates the system router.
pub fn router() -> Router<SharedState> {
    Router::new().route("/status", get(get_status))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// System status response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "version": "0.1.0",
    "uptime_secs": 3600,
    "monitoring": "active",
    "hazard_designated": true,
    "escalation_triggered": false,
    "last_sample": {
        "speed_mps": 1.4,
        "altitude_meters": 31.0,
        "timestamp_ms": 1754550000000_i64
    }
}))]
pub struct SystemStatusResponse {
    /// Server version.
    #[schema(example = "0.1.0")]
    pub version: String,

    /// Server uptime in seconds.
    #[schema(example = 3600)]
    pub uptime_secs: u64,

    /// Current monitoring gate state.
    #[schema(example = "active")]
    pub monitoring: String,

    /// Whether a hazard zone is designated.
    #[schema(example = true)]
    pub hazard_designated: bool,

    /// Whether an escalation has been triggered this process lifetime.
    #[schema(example = false)]
    pub escalation_triggered: bool,

    /// Diagnostics retained from the last processed sample.
    pub last_sample: LastSampleBody,
}

/// Diagnostic fields of the last processed sample.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "speed_mps": 1.4,
    "altitude_meters": 31.0,
    "timestamp_ms": 1754550000000_i64
}))]
pub struct LastSampleBody {
    /// Ground speed, if the sample reported one.
    pub speed_mps: Option<f64>,

    /// Altitude, if the sample reported one.
    pub altitude_meters: Option<f64>,

    /// Sample time as epoch milliseconds. Null before the first sample.
    pub timestamp_ms: Option<i64>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Get system status.
#[utoipa::path(
    get,
    path = "/system/status",
    tag = "system",
    operation_id = "getSystemStatus",
    summary = "Get system status",
    description = "Returns version, uptime, monitoring gate state, hazard \
        presence, the escalation latch, and last-sample diagnostics.",
    responses(
        (status = 200, description = "Status retrieved", body = SystemStatusResponse)
    )
)]
pub async fn get_status(State(state): State<SharedState>) -> Json<SystemStatusResponse> {
    let state_guard = state.read().await;
    let diag = state_guard.processor.last_sample();

    Json(SystemStatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state_guard.uptime_secs(),
        monitoring: state_guard.processor.monitoring().as_str().to_string(),
        hazard_designated: state_guard.processor.hazard().is_some(),
        escalation_triggered: state_guard.processor.escalation_triggered(),
        last_sample: LastSampleBody {
            speed_mps: diag.speed_mps,
            altitude_meters: diag.altitude_meters,
            timestamp_ms: diag.timestamp_ms,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_response_serialization() {
        let response = SystemStatusResponse {
            version: "0.1.0".to_string(),
            uptime_secs: 42,
            monitoring: "paused".to_string(),
            hazard_designated: false,
            escalation_triggered: false,
            last_sample: LastSampleBody {
                speed_mps: None,
                altitude_meters: None,
                timestamp_ms: None,
            },
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"uptime_secs\":42"));
        assert!(json.contains("\"timestamp_ms\":null"));
    }
}
