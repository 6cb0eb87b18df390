//! Advisory overlay state machine.
//!
//! Governs the transient advisory panel shown over the map. The machine has
//! two states, `Hidden` and `Visible(zone)`, and guarantees at most one
//! visible overlay instance at any time.
//!
//! A classification arriving while an overlay is already visible is a no-op,
//! even if the zone changed; the panel keeps its original copy until the user
//! dismisses it.

use serde::Serialize;
use utoipa::ToSchema;

use crate::classify::SafetyZone;

/// Overlay visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    /// No overlay is rendered.
    Hidden,
    /// Exactly one overlay instance is rendered for the given zone.
    Visible(SafetyZone),
}

/// A display request emitted when the overlay becomes visible.
///
/// Consumed by the rendering collaborator; haven itself does no drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[schema(example = json!({
    "zone": "moderate",
    "title": "Moderate safety zone",
    "subtitle": "Lower activity and changing surroundings"
}))]
pub struct OverlayRequest {
    /// Zone the overlay was shown for.
    pub zone: SafetyZone,

    /// Panel title.
    #[schema(example = "Moderate safety zone")]
    pub title: &'static str,

    /// Panel subtitle.
    #[schema(example = "Lower activity and changing surroundings")]
    pub subtitle: &'static str,
}

impl OverlayRequest {
    /// The fixed copy pair for a zone.
    #[must_use]
    pub const fn for_zone(zone: SafetyZone) -> Self {
        let (title, subtitle) = match zone {
            SafetyZone::Safe => ("Safe area", "Conditions around you are stable"),
            SafetyZone::Moderate => (
                "Moderate safety zone",
                "Lower activity and changing surroundings",
            ),
            SafetyZone::Danger => ("Higher risk area", "Surroundings are less predictable here"),
        };
        Self {
            zone,
            title,
            subtitle,
        }
    }
}

/// Process-lifetime state machine for the advisory overlay.
///
/// Transitions:
/// - `Hidden → Visible(zone)` when a non-safe classification arrives while
///   hidden, emitting an [`OverlayRequest`];
/// - `Visible(_) → Hidden` on explicit dismissal only.
#[derive(Debug, Clone, Default)]
pub struct OverlayStateMachine {
    visible: Option<SafetyZone>,
}

impl OverlayStateMachine {
    /// Create the machine in its initial `Hidden` state.
    #[must_use]
    pub const fn new() -> Self {
        Self { visible: None }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> OverlayState {
        match self.visible {
            Some(zone) => OverlayState::Visible(zone),
            None => OverlayState::Hidden,
        }
    }

    /// Whether an overlay instance is currently rendered.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible.is_some()
    }

    /// The display request for the currently visible overlay, if any.
    ///
    /// Lets a rendering client that missed the original emission recover the
    /// copy it should be showing.
    #[must_use]
    pub fn current_request(&self) -> Option<OverlayRequest> {
        self.visible.map(OverlayRequest::for_zone)
    }

    /// Feed a classification result into the machine.
    ///
    /// Returns the display request to emit when this transitions the machine
    /// to `Visible`. Safe classifications never show an overlay, and any
    /// classification while already visible is a no-op.
    pub fn on_classification(&mut self, zone: SafetyZone) -> Option<OverlayRequest> {
        if self.visible.is_some() || zone.is_safe() {
            return None;
        }
        self.visible = Some(zone);
        Some(OverlayRequest::for_zone(zone))
    }

    /// Explicit user dismissal.
    ///
    /// Returns `true` when an overlay was visible, signalling the hide-all
    /// request to the rendering collaborator.
    pub fn dismiss(&mut self) -> bool {
        self.visible.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_hidden() {
        let machine = OverlayStateMachine::new();
        assert_eq!(machine.state(), OverlayState::Hidden);
        assert!(!machine.is_visible());
        assert!(machine.current_request().is_none());
    }

    #[test]
    fn test_non_safe_classification_shows_overlay() {
        let mut machine = OverlayStateMachine::new();
        let request = machine.on_classification(SafetyZone::Moderate).unwrap();

        assert_eq!(machine.state(), OverlayState::Visible(SafetyZone::Moderate));
        assert_eq!(request.title, "Moderate safety zone");
        assert_eq!(request.subtitle, "Lower activity and changing surroundings");
    }

    #[test]
    fn test_safe_classification_never_shows_overlay() {
        let mut machine = OverlayStateMachine::new();
        assert!(machine.on_classification(SafetyZone::Safe).is_none());
        assert_eq!(machine.state(), OverlayState::Hidden);
    }

    #[test]
    fn test_visible_overlay_ignores_zone_changes() {
        let mut machine = OverlayStateMachine::new();
        machine.on_classification(SafetyZone::Moderate).unwrap();

        // Risk escalates, but the panel keeps showing its original content.
        assert!(machine.on_classification(SafetyZone::Danger).is_none());
        assert_eq!(machine.state(), OverlayState::Visible(SafetyZone::Moderate));
        assert_eq!(
            machine.current_request().unwrap().title,
            "Moderate safety zone"
        );
    }

    #[test]
    fn test_dismiss_returns_to_hidden_from_any_visible_state() {
        for zone in [SafetyZone::Moderate, SafetyZone::Danger] {
            let mut machine = OverlayStateMachine::new();
            machine.on_classification(zone).unwrap();
            assert!(machine.dismiss());
            assert_eq!(machine.state(), OverlayState::Hidden);
        }
    }

    #[test]
    fn test_dismiss_while_hidden_is_a_no_op() {
        let mut machine = OverlayStateMachine::new();
        assert!(!machine.dismiss());
        assert_eq!(machine.state(), OverlayState::Hidden);
    }

    #[test]
    fn test_overlay_can_show_again_after_dismissal() {
        let mut machine = OverlayStateMachine::new();
        machine.on_classification(SafetyZone::Danger).unwrap();
        machine.dismiss();

        let request = machine.on_classification(SafetyZone::Danger).unwrap();
        assert_eq!(request.title, "Higher risk area");
        assert_eq!(request.subtitle, "Surroundings are less predictable here");
    }

    #[test]
    fn test_copy_pairs_exist_for_all_zones() {
        assert_eq!(OverlayRequest::for_zone(SafetyZone::Safe).title, "Safe area");
        assert_eq!(
            OverlayRequest::for_zone(SafetyZone::Safe).subtitle,
            "Conditions around you are stable"
        );
        assert_eq!(
            OverlayRequest::for_zone(SafetyZone::Danger).title,
            "Higher risk area"
        );
    }
}
