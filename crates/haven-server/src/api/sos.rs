//! Emergency escalation API endpoint.
//!
//! Triggering an escalation records the reason, forces the persisted risk
//! state to danger with the minimum score, and hands the client off to the
//! escalation view.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::{ApiError, ApiResult};
use crate::state::SharedState;

/// Creates the sos router.
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(trigger_escalation))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Escalation request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({ "reason": "user pressed the SOS button" }))]
pub struct EscalationRequest {
    /// Why the escalation was triggered. Required and must be non-empty.
    #[schema(example = "user pressed the SOS button", min_length = 1)]
    pub reason: String,
}

/// Escalation hand-off record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "accepted": true,
    "incident_id": "2f8a1f6c-43cf-4f9d-9f3e-2f24c76f2a11",
    "reason": "user pressed the SOS button",
    "risk_level": "danger",
    "safety_score": 5,
    "view": "escalation",
    "triggered_at_utc": "2026-08-07T12:00:00Z"
}))]
pub struct EscalationResponse {
    /// Whether the escalation was recorded.
    #[schema(example = true)]
    pub accepted: bool,

    /// Unique id for this escalation.
    pub incident_id: String,

    /// The recorded reason.
    #[schema(example = "user pressed the SOS button")]
    pub reason: String,

    /// Risk level forced by the escalation.
    #[schema(example = "danger")]
    pub risk_level: String,

    /// Safety score forced by the escalation.
    #[schema(example = 5)]
    pub safety_score: u8,

    /// Navigation target the client should hand off to.
    #[schema(example = "escalation")]
    pub view: String,

    /// When the escalation was triggered.
    #[schema(example = "2026-08-07T12:00:00Z")]
    pub triggered_at_utc: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Trigger an emergency escalation.
#[utoipa::path(
    post,
    path = "/sos",
    tag = "sos",
    operation_id = "triggerEscalation",
    summary = "Trigger an emergency escalation",
    description = "Records the reason, forces the persisted risk level to \
        danger with the minimum safety score, and returns the hand-off record \
        for the escalation view. Repeat triggers overwrite the reason.",
    request_body = EscalationRequest,
    responses(
        (status = 200, description = "Escalation recorded", body = EscalationResponse),
        (status = 400, description = "Empty reason")
    )
)]
pub async fn trigger_escalation(
    State(state): State<SharedState>,
    Json(request): Json<EscalationRequest>,
) -> ApiResult<Json<EscalationResponse>> {
    let reason = request.reason.trim();
    if reason.is_empty() {
        return Err(ApiError::BadRequest {
            error_code: "empty_reason".to_string(),
            message: "Escalation reason cannot be empty".to_string(),
        });
    }

    let mut state_guard = state.write().await;
    let record = state_guard.processor.trigger_escalation(reason.to_string());

    Ok(Json(EscalationResponse {
        accepted: true,
        incident_id: record.incident_id.to_string(),
        reason: record.reason,
        risk_level: "danger".to_string(),
        safety_score: haven_core::monitor::ESCALATION_SCORE,
        view: record.view.to_string(),
        triggered_at_utc: record.triggered_at_utc.to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escalation_request_deserialization() {
        let json = r#"{"reason": "felt unsafe"}"#;
        let request: EscalationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.reason, "felt unsafe");
    }

    #[test]
    fn test_escalation_response_serialization() {
        let response = EscalationResponse {
            accepted: true,
            incident_id: "id".to_string(),
            reason: "felt unsafe".to_string(),
            risk_level: "danger".to_string(),
            safety_score: 5,
            view: "escalation".to_string(),
            triggered_at_utc: "2026-08-07T12:00:00Z".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"risk_level\":\"danger\""));
        assert!(json.contains("\"safety_score\":5"));
    }
}
