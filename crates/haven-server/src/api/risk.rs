//! Risk state API endpoint.
//!
//! Serves the persisted risk state back to the rest of the application (the
//! home screen, the escalation view) without rerunning any classification.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use haven_core::RiskKey;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::SharedState;

/// Creates the risk router.
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(get_risk))
}

/// Persisted risk state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "risk_level": "safe",
    "safety_score": 90,
    "sos_reason": null
}))]
pub struct RiskResponse {
    /// Last persisted risk level (`safe`, `moderate`, or `danger`).
    #[schema(example = "safe")]
    pub risk_level: Option<String>,

    /// Last persisted safety score.
    #[schema(example = 90)]
    pub safety_score: Option<u8>,

    /// Reason recorded by the last escalation, if any.
    pub sos_reason: Option<String>,
}

/// Get the persisted risk state.
#[utoipa::path(
    get,
    path = "/risk",
    tag = "risk",
    operation_id = "getRisk",
    summary = "Get the persisted risk state",
    description = "Returns the last risk level and safety score the pipeline \
        published, plus any recorded escalation reason. All fields are null \
        before the first classified sample.",
    responses(
        (status = 200, description = "Risk state", body = RiskResponse)
    )
)]
pub async fn get_risk(State(state): State<SharedState>) -> Json<RiskResponse> {
    let state_guard = state.read().await;

    let safety_score = state_guard
        .processor
        .risk_value(RiskKey::SafetyScore)
        .and_then(|s| s.parse().ok());

    Json(RiskResponse {
        risk_level: state_guard.processor.risk_value(RiskKey::RiskLevel),
        safety_score,
        sos_reason: state_guard.processor.risk_value(RiskKey::SosReason),
    })
}
