//! Advisory overlay API endpoints.
//!
//! The rendering client polls the overlay state to know what to draw and
//! posts the user's dismissal back. The state machine itself lives in the
//! core; these endpoints only expose it.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::SharedState;

/// Creates the overlay router with all endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(get_overlay))
        .route("/dismiss", post(dismiss_overlay))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Current overlay state for the rendering client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "visible": true,
    "zone": "moderate",
    "title": "Moderate safety zone",
    "subtitle": "Lower activity and changing surroundings"
}))]
pub struct OverlayResponse {
    /// Whether an overlay instance should be rendered.
    #[schema(example = true)]
    pub visible: bool,

    /// Zone the overlay was shown for, when visible.
    #[schema(example = "moderate")]
    pub zone: Option<String>,

    /// Panel title, when visible.
    #[schema(example = "Moderate safety zone")]
    pub title: Option<String>,

    /// Panel subtitle, when visible.
    #[schema(example = "Lower activity and changing surroundings")]
    pub subtitle: Option<String>,
}

/// Result of a dismissal.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "dismissed": true }))]
pub struct DismissOverlayResponse {
    /// Whether an overlay was visible and is now hidden. When `true` the
    /// client must remove all overlay instances.
    #[schema(example = true)]
    pub dismissed: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// Get the current overlay state.
#[utoipa::path(
    get,
    path = "/overlay",
    tag = "overlay",
    operation_id = "getOverlay",
    summary = "Get the advisory overlay state",
    description = "Returns whether the advisory overlay is visible and, if so, \
        the copy it should display. The copy never changes while visible; it \
        reflects the zone at the moment the overlay was shown.",
    responses(
        (status = 200, description = "Overlay state", body = OverlayResponse)
    )
)]
pub async fn get_overlay(State(state): State<SharedState>) -> Json<OverlayResponse> {
    let state_guard = state.read().await;
    let request = state_guard.processor.overlay().current_request();

    Json(OverlayResponse {
        visible: request.is_some(),
        zone: request.map(|r| r.zone.as_str().to_string()),
        title: request.map(|r| r.title.to_string()),
        subtitle: request.map(|r| r.subtitle.to_string()),
    })
}

/// Dismiss the advisory overlay.
#[utoipa::path(
    post,
    path = "/overlay/dismiss",
    tag = "overlay",
    operation_id = "dismissOverlay",
    summary = "Dismiss the advisory overlay",
    description = "Explicit user dismissal. The only transition out of the \
        visible state; classification events never auto-dismiss.",
    responses(
        (status = 200, description = "Dismissal processed", body = DismissOverlayResponse)
    )
)]
pub async fn dismiss_overlay(State(state): State<SharedState>) -> Json<DismissOverlayResponse> {
    let mut state_guard = state.write().await;
    Json(DismissOverlayResponse {
        dismissed: state_guard.processor.dismiss_overlay(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_overlay_serialization() {
        let response = OverlayResponse {
            visible: false,
            zone: None,
            title: None,
            subtitle: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"visible\":false"));
        assert!(json.contains("\"zone\":null"));
    }
}
