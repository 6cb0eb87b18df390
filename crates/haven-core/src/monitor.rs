//! Location sample processing pipeline.
//!
//! [`SampleProcessor`] is the orchestrator: it receives discrete external
//! events (position samples, sensor errors, operator hazard designations,
//! overlay dismissals, escalation requests), runs them through the
//! classifier, publishes the result to the risk sink, and drives the overlay
//! state machine. Events are delivered serially by the hosting environment;
//! every handler runs to completion synchronously.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::classify::{classify, SafetyZone, ZoneClassification};
use crate::config::HavenConfig;
use crate::geo::Coordinate;
use crate::hazard::{HazardZone, HazardZoneRegistry};
use crate::overlay::{OverlayRequest, OverlayStateMachine};
use crate::sensor::{LocationSample, SensorErrorKind};
use crate::sink::{RiskKey, RiskSink};

/// Safety score forced by an escalation.
pub const ESCALATION_SCORE: u8 = 5;

/// Navigation target handed off after an escalation.
pub const ESCALATION_VIEW: &str = "escalation";

/// Process-wide gate for sample ingestion.
///
/// Owned by the hosting environment; the pipeline only reads it. No samples
/// are processed while paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MonitoringState {
    /// Samples are classified as they arrive.
    Active,
    /// Sample ingestion is suspended.
    #[default]
    Paused,
}

impl MonitoringState {
    /// Stable string form, matching the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
        }
    }
}

/// Result of processing one position sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleOutcome {
    /// The classification computed for the sample.
    pub classification: ZoneClassification,

    /// Display request emitted if this sample made the overlay visible.
    pub overlay_shown: Option<OverlayRequest>,
}

/// Diagnostic fields retained from the last processed sample.
///
/// Kept for a future escalation heuristic; nothing consumes them yet beyond
/// the status surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct SampleDiagnostics {
    /// Ground speed of the last sample, if reported.
    pub speed_mps: Option<f64>,

    /// Altitude of the last sample, if reported.
    pub altitude_meters: Option<f64>,

    /// Timestamp of the last sample as epoch milliseconds.
    pub timestamp_ms: Option<i64>,
}

/// Record emitted by an escalation, handed to the hosting environment for
/// the navigation hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EscalationRecord {
    /// Unique id for this escalation.
    pub incident_id: Uuid,

    /// Operator- or user-supplied reason.
    pub reason: String,

    /// When the escalation was triggered.
    pub triggered_at_utc: DateTime<Utc>,

    /// Navigation target for the hand-off.
    #[schema(example = "escalation")]
    pub view: &'static str,
}

/// Orchestrator for the safety classification pipeline.
pub struct SampleProcessor {
    registry: HazardZoneRegistry,
    overlay: OverlayStateMachine,
    sink: Box<dyn RiskSink>,
    monitoring: MonitoringState,
    hazard_radius_meters: f64,
    diagnostics: SampleDiagnostics,
    escalation_triggered: bool,
}

impl SampleProcessor {
    /// Create a processor publishing to `sink`, configured from `config`.
    #[must_use]
    pub fn new(config: &HavenConfig, sink: Box<dyn RiskSink>) -> Self {
        Self {
            registry: HazardZoneRegistry::new(),
            overlay: OverlayStateMachine::new(),
            sink,
            monitoring: MonitoringState::default(),
            hazard_radius_meters: config.monitor.hazard_radius_meters,
            diagnostics: SampleDiagnostics::default(),
            escalation_triggered: false,
        }
    }

    /// Process one position sample.
    ///
    /// Returns `None` without touching any state while monitoring is paused.
    /// Otherwise classifies the sample, publishes `riskLevel` and
    /// `safetyScore` to the sink, drives the overlay machine, and retains
    /// the sample's diagnostic fields.
    pub fn on_sample(&mut self, sample: &LocationSample) -> Option<SampleOutcome> {
        if self.monitoring != MonitoringState::Active {
            tracing::debug!("monitoring paused, sample ignored");
            return None;
        }

        let classification = classify(sample, self.registry.current());

        self.sink
            .write(RiskKey::RiskLevel, classification.zone.as_str());
        self.sink
            .write(RiskKey::SafetyScore, &classification.score.to_string());

        let overlay_shown = self.overlay.on_classification(classification.zone);

        self.diagnostics = SampleDiagnostics {
            speed_mps: sample.speed_mps,
            altitude_meters: sample.altitude_meters,
            timestamp_ms: Some(sample.timestamp_ms),
        };

        tracing::info!(
            zone = classification.zone.as_str(),
            score = classification.score,
            accuracy_meters = sample.accuracy_or_default(),
            overlay_shown = overlay_shown.is_some(),
            "sample classified"
        );

        Some(SampleOutcome {
            classification,
            overlay_shown,
        })
    }

    /// Handle a sensor error event.
    ///
    /// Returns the advisory message to surface to the user for a permission
    /// denial; transient errors are logged and monitoring continues.
    pub fn on_sensor_error(&mut self, kind: SensorErrorKind) -> Option<String> {
        if kind.requires_user_advisory() {
            tracing::warn!(kind = kind.as_str(), "sensor permission denied");
            Some(crate::error::HavenError::SensorPermissionDenied.to_string())
        } else {
            tracing::debug!(kind = kind.as_str(), "transient sensor error ignored");
            None
        }
    }

    /// Operator hazard designation.
    ///
    /// Replaces any prior zone with one centered on `point` at the
    /// configured radius.
    pub fn designate_hazard(&mut self, point: Coordinate) -> HazardZone {
        let zone = *self.registry.designate(point, self.hazard_radius_meters);
        tracing::info!(
            latitude = point.latitude,
            longitude = point.longitude,
            radius_meters = zone.radius_meters,
            "hazard zone designated"
        );
        zone
    }

    /// The currently designated hazard zone, if any.
    #[must_use]
    pub const fn hazard(&self) -> Option<&HazardZone> {
        self.registry.current()
    }

    /// Remove the designated hazard zone. Returns whether one existed.
    pub fn clear_hazard(&mut self) -> bool {
        let cleared = self.registry.clear();
        if cleared {
            tracing::info!("hazard zone cleared");
        }
        cleared
    }

    /// Trigger an emergency escalation.
    ///
    /// Forces the persisted risk state to danger with the escalation score,
    /// records the reason, and returns the hand-off record. Repeat triggers
    /// overwrite the recorded reason.
    pub fn trigger_escalation(&mut self, reason: String) -> EscalationRecord {
        self.sink.write(RiskKey::SosReason, &reason);
        self.sink
            .write(RiskKey::RiskLevel, SafetyZone::Danger.as_str());
        self.sink
            .write(RiskKey::SafetyScore, &ESCALATION_SCORE.to_string());
        self.escalation_triggered = true;

        let record = EscalationRecord {
            incident_id: Uuid::new_v4(),
            reason,
            triggered_at_utc: Utc::now(),
            view: ESCALATION_VIEW,
        };
        tracing::warn!(
            incident_id = %record.incident_id,
            reason = %record.reason,
            "escalation triggered"
        );
        record
    }

    /// Whether an escalation has been triggered in this process lifetime.
    #[must_use]
    pub const fn escalation_triggered(&self) -> bool {
        self.escalation_triggered
    }

    /// Forward a user dismissal to the overlay machine.
    ///
    /// Returns `true` when an overlay was hidden (the hide-all request).
    pub fn dismiss_overlay(&mut self) -> bool {
        let dismissed = self.overlay.dismiss();
        if dismissed {
            tracing::debug!("overlay dismissed");
        }
        dismissed
    }

    /// The overlay machine, for state queries.
    #[must_use]
    pub const fn overlay(&self) -> &OverlayStateMachine {
        &self.overlay
    }

    /// Current monitoring gate value.
    #[must_use]
    pub const fn monitoring(&self) -> MonitoringState {
        self.monitoring
    }

    /// Update the monitoring gate. Called by the hosting environment only.
    pub fn set_monitoring(&mut self, state: MonitoringState) {
        if state != self.monitoring {
            tracing::info!(state = state.as_str(), "monitoring state changed");
        }
        self.monitoring = state;
    }

    /// Update the radius applied to future hazard designations.
    pub fn set_hazard_radius(&mut self, radius_meters: f64) {
        self.hazard_radius_meters = radius_meters;
    }

    /// Diagnostics retained from the last processed sample.
    #[must_use]
    pub const fn last_sample(&self) -> &SampleDiagnostics {
        &self.diagnostics
    }

    /// Read back a persisted risk value.
    #[must_use]
    pub fn risk_value(&self, key: RiskKey) -> Option<String> {
        self.sink.read(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::OverlayState;
    use crate::sink::MemorySink;

    fn processor() -> SampleProcessor {
        let mut p = SampleProcessor::new(&HavenConfig::default(), Box::new(MemorySink::new()));
        p.set_monitoring(MonitoringState::Active);
        p
    }

    fn sample(lat: f64, lon: f64, accuracy: Option<f64>) -> LocationSample {
        LocationSample {
            coordinate: Coordinate::new(lat, lon),
            accuracy_meters: accuracy,
            speed_mps: Some(1.2),
            altitude_meters: Some(30.0),
            timestamp_ms: 1_754_550_000_000,
        }
    }

    #[test]
    fn test_sample_at_hazard_center_is_danger_and_persisted() {
        let mut p = processor();
        p.designate_hazard(Coordinate::new(10.0, 10.0));

        let outcome = p.on_sample(&sample(10.0, 10.0, Some(5.0))).unwrap();

        assert_eq!(outcome.classification.zone, SafetyZone::Danger);
        assert_eq!(outcome.classification.score, 25);
        assert_eq!(p.risk_value(RiskKey::RiskLevel).as_deref(), Some("danger"));
        assert_eq!(p.risk_value(RiskKey::SafetyScore).as_deref(), Some("25"));
    }

    #[test]
    fn test_good_accuracy_no_hazard_is_safe_without_overlay() {
        let mut p = processor();
        let outcome = p.on_sample(&sample(10.0, 10.0, Some(20.0))).unwrap();

        assert_eq!(outcome.classification.zone, SafetyZone::Safe);
        assert_eq!(outcome.classification.score, 90);
        assert!(outcome.overlay_shown.is_none());
        assert_eq!(p.overlay().state(), OverlayState::Hidden);
        assert_eq!(p.risk_value(RiskKey::RiskLevel).as_deref(), Some("safe"));
        assert_eq!(p.risk_value(RiskKey::SafetyScore).as_deref(), Some("90"));
    }

    #[test]
    fn test_poor_accuracy_shows_moderate_overlay() {
        let mut p = processor();
        let outcome = p.on_sample(&sample(10.0, 10.0, Some(80.0))).unwrap();

        assert_eq!(outcome.classification.zone, SafetyZone::Moderate);
        assert_eq!(outcome.classification.score, 60);
        let request = outcome.overlay_shown.unwrap();
        assert_eq!(request.zone, SafetyZone::Moderate);
        assert_eq!(
            p.overlay().state(),
            OverlayState::Visible(SafetyZone::Moderate)
        );
    }

    #[test]
    fn test_visible_overlay_survives_zone_escalation_until_dismissed() {
        let mut p = processor();

        // Moderate sample shows the overlay.
        p.on_sample(&sample(10.0, 10.0, Some(80.0))).unwrap();

        // Zone escalates to danger; the overlay keeps its original content.
        p.designate_hazard(Coordinate::new(10.0, 10.0));
        let outcome = p.on_sample(&sample(10.0, 10.0, Some(80.0))).unwrap();
        assert_eq!(outcome.classification.zone, SafetyZone::Danger);
        assert!(outcome.overlay_shown.is_none());
        assert_eq!(
            p.overlay().state(),
            OverlayState::Visible(SafetyZone::Moderate)
        );

        // Only explicit dismissal hides it.
        assert!(p.dismiss_overlay());
        assert_eq!(p.overlay().state(), OverlayState::Hidden);
    }

    #[test]
    fn test_second_designation_replaces_first() {
        let mut p = processor();
        p.designate_hazard(Coordinate::new(10.0, 10.0));
        p.designate_hazard(Coordinate::new(20.0, 20.0));

        // Inside the first (replaced) zone: no longer danger.
        let outcome = p.on_sample(&sample(10.0, 10.0, Some(20.0))).unwrap();
        assert_eq!(outcome.classification.zone, SafetyZone::Safe);

        // Inside the second zone: danger.
        let outcome = p.on_sample(&sample(20.0, 20.0, Some(20.0))).unwrap();
        assert_eq!(outcome.classification.zone, SafetyZone::Danger);
    }

    #[test]
    fn test_designation_uses_configured_radius() {
        let mut config = HavenConfig::default();
        config.monitor.hazard_radius_meters = 250.0;
        let mut p = SampleProcessor::new(&config, Box::new(MemorySink::new()));

        let zone = p.designate_hazard(Coordinate::new(10.0, 10.0));
        assert!((zone.radius_meters - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_paused_monitoring_ignores_samples() {
        let mut p = SampleProcessor::new(&HavenConfig::default(), Box::new(MemorySink::new()));
        assert_eq!(p.monitoring(), MonitoringState::Paused);

        assert!(p.on_sample(&sample(10.0, 10.0, Some(20.0))).is_none());
        assert!(p.risk_value(RiskKey::RiskLevel).is_none());
        assert_eq!(p.last_sample().timestamp_ms, None);
    }

    #[test]
    fn test_permission_denied_surfaces_advisory() {
        let mut p = processor();
        let advisory = p.on_sensor_error(SensorErrorKind::PermissionDenied);
        assert!(advisory.unwrap().contains("Location permission"));
    }

    #[test]
    fn test_transient_errors_are_silent() {
        let mut p = processor();
        assert!(p.on_sensor_error(SensorErrorKind::Timeout).is_none());
        assert!(p
            .on_sensor_error(SensorErrorKind::PositionUnavailable)
            .is_none());
    }

    #[test]
    fn test_escalation_forces_danger_state() {
        let mut p = processor();
        p.on_sample(&sample(10.0, 10.0, Some(20.0))).unwrap();

        let record = p.trigger_escalation("manual SOS".into());

        assert_eq!(record.view, "escalation");
        assert_eq!(record.reason, "manual SOS");
        assert!(p.escalation_triggered());
        assert_eq!(p.risk_value(RiskKey::RiskLevel).as_deref(), Some("danger"));
        assert_eq!(p.risk_value(RiskKey::SafetyScore).as_deref(), Some("5"));
        assert_eq!(
            p.risk_value(RiskKey::SosReason).as_deref(),
            Some("manual SOS")
        );
    }

    #[test]
    fn test_repeat_escalation_overwrites_reason() {
        let mut p = processor();
        p.trigger_escalation("first".into());
        p.trigger_escalation("second".into());

        assert!(p.escalation_triggered());
        assert_eq!(p.risk_value(RiskKey::SosReason).as_deref(), Some("second"));
    }

    #[test]
    fn test_diagnostics_retained_from_last_sample() {
        let mut p = processor();
        p.on_sample(&sample(10.0, 10.0, Some(20.0))).unwrap();

        let diag = p.last_sample();
        assert_eq!(diag.speed_mps, Some(1.2));
        assert_eq!(diag.altitude_meters, Some(30.0));
        assert_eq!(diag.timestamp_ms, Some(1_754_550_000_000));
    }

    #[test]
    fn test_monitoring_state_wire_format() {
        assert_eq!(
            serde_json::to_string(&MonitoringState::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(MonitoringState::Paused.as_str(), "paused");
    }
}
