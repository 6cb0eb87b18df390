//! Safety zone classification.
//!
//! Maps a location sample and the current hazard zone to a discrete safety
//! zone, a numeric score, and a display color. Proximity to a designated
//! hazard always dominates; degraded GPS accuracy is the fallback heuristic
//! for environmental uncertainty when no hazard applies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::hazard::HazardZone;
use crate::sensor::LocationSample;

/// Accuracy above which a sample is classified as moderate risk, in metres.
pub const MODERATE_ACCURACY_THRESHOLD_METERS: f64 = 50.0;

/// Score assigned to a danger classification.
pub const DANGER_SCORE: u8 = 25;
/// Score assigned to a moderate classification.
pub const MODERATE_SCORE: u8 = 60;
/// Score assigned to a safe classification.
pub const SAFE_SCORE: u8 = 90;

/// Discrete safety zones, ordered by increasing risk.
///
/// The lowercase string forms (`safe`, `moderate`, `danger`) are a
/// cross-boundary contract consumed by the rest of the application and must
/// not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SafetyZone {
    /// Stable conditions, no known hazard nearby.
    Safe,
    /// Degraded confidence in the surroundings.
    Moderate,
    /// Inside a designated hazard zone.
    Danger,
}

impl SafetyZone {
    /// Stable string form, matching the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Moderate => "moderate",
            Self::Danger => "danger",
        }
    }

    /// Whether this is the safe zone.
    #[must_use]
    pub const fn is_safe(&self) -> bool {
        matches!(self, Self::Safe)
    }

    /// The display color associated with this zone.
    #[must_use]
    pub const fn color(&self) -> ZoneColor {
        match self {
            Self::Safe => ZoneColor::Green,
            Self::Moderate => ZoneColor::Yellow,
            Self::Danger => ZoneColor::Red,
        }
    }

    /// The safety score associated with this zone.
    ///
    /// Deterministic and monotonic in the risk tier: danger scores lowest,
    /// safe scores highest.
    #[must_use]
    pub const fn score(&self) -> u8 {
        match self {
            Self::Safe => SAFE_SCORE,
            Self::Moderate => MODERATE_SCORE,
            Self::Danger => DANGER_SCORE,
        }
    }
}

/// Display colors for the map circle and overlay accents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ZoneColor {
    /// Safe.
    Green,
    /// Moderate.
    Yellow,
    /// Danger.
    Red,
}

impl ZoneColor {
    /// Hex value used by the map rendering client.
    #[must_use]
    pub const fn hex(&self) -> &'static str {
        match self {
            Self::Green => "#2a9d8f",
            Self::Yellow => "#e9c46a",
            Self::Red => "#e63946",
        }
    }
}

/// The result of classifying one location sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "zone": "safe", "score": 90, "color": "green" }))]
pub struct ZoneClassification {
    /// The classified zone.
    pub zone: SafetyZone,

    /// Safety score in `[0, 100]`.
    #[schema(example = 90, minimum = 0, maximum = 100)]
    pub score: u8,

    /// Display color for the zone.
    pub color: ZoneColor,
}

impl From<SafetyZone> for ZoneClassification {
    fn from(zone: SafetyZone) -> Self {
        Self {
            zone,
            score: zone.score(),
            color: zone.color(),
        }
    }
}

/// Classify a sample against the current hazard zone.
///
/// Precedence, first match wins:
/// 1. inside the designated hazard zone → danger;
/// 2. accuracy worse than [`MODERATE_ACCURACY_THRESHOLD_METERS`] → moderate;
/// 3. otherwise → safe.
///
/// Pure and total: no side effects, always terminates, never fails for valid
/// coordinates. A sample missing its accuracy field is treated at the 20 m
/// default (see [`LocationSample::accuracy_or_default`]).
#[must_use]
pub fn classify(sample: &LocationSample, hazard: Option<&HazardZone>) -> ZoneClassification {
    if let Some(zone) = hazard {
        if zone.contains(&sample.coordinate) {
            return SafetyZone::Danger.into();
        }
    }

    if sample.accuracy_or_default() > MODERATE_ACCURACY_THRESHOLD_METERS {
        SafetyZone::Moderate.into()
    } else {
        SafetyZone::Safe.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    fn sample(lat: f64, lon: f64, accuracy: Option<f64>) -> LocationSample {
        LocationSample {
            coordinate: Coordinate::new(lat, lon),
            accuracy_meters: accuracy,
            speed_mps: None,
            altitude_meters: None,
            timestamp_ms: 1_754_550_000_000,
        }
    }

    fn hazard_at(lat: f64, lon: f64) -> HazardZone {
        HazardZone {
            center: Coordinate::new(lat, lon),
            radius_meters: 100.0,
        }
    }

    #[test]
    fn test_hazard_center_is_danger_regardless_of_accuracy() {
        let zone = hazard_at(10.0, 10.0);
        for accuracy in [None, Some(5.0), Some(500.0)] {
            let result = classify(&sample(10.0, 10.0, accuracy), Some(&zone));
            assert_eq!(result.zone, SafetyZone::Danger);
            assert_eq!(result.score, 25);
            assert_eq!(result.color, ZoneColor::Red);
        }
    }

    #[test]
    fn test_good_accuracy_without_hazard_is_safe() {
        let result = classify(&sample(10.0, 10.0, Some(20.0)), None);
        assert_eq!(result.zone, SafetyZone::Safe);
        assert_eq!(result.score, 90);
        assert_eq!(result.color, ZoneColor::Green);
    }

    #[test]
    fn test_poor_accuracy_without_hazard_is_moderate() {
        let result = classify(&sample(10.0, 10.0, Some(80.0)), None);
        assert_eq!(result.zone, SafetyZone::Moderate);
        assert_eq!(result.score, 60);
        assert_eq!(result.color, ZoneColor::Yellow);
    }

    #[test]
    fn test_threshold_boundary_is_safe() {
        // Exactly 50 m accuracy is still safe; only worse-than-threshold
        // falls back to moderate.
        let result = classify(&sample(10.0, 10.0, Some(50.0)), None);
        assert_eq!(result.zone, SafetyZone::Safe);
    }

    #[test]
    fn test_outside_hazard_falls_through_to_accuracy_rules() {
        // ~1.1 km from the hazard center, well outside the 100 m radius.
        let zone = hazard_at(10.0, 10.0);
        let result = classify(&sample(10.01, 10.0, Some(80.0)), Some(&zone));
        assert_eq!(result.zone, SafetyZone::Moderate);
    }

    #[test]
    fn test_missing_accuracy_defaults_to_safe() {
        let result = classify(&sample(10.0, 10.0, None), None);
        assert_eq!(result.zone, SafetyZone::Safe);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let zone = hazard_at(10.0, 10.0);
        let s = sample(10.0005, 10.0, Some(42.0));
        let first = classify(&s, Some(&zone));
        for _ in 0..10 {
            assert_eq!(classify(&s, Some(&zone)), first);
        }
    }

    #[test]
    fn test_scores_are_monotonic_in_risk() {
        assert!(SafetyZone::Danger.score() < SafetyZone::Moderate.score());
        assert!(SafetyZone::Moderate.score() < SafetyZone::Safe.score());
    }

    #[test]
    fn test_zone_wire_format() {
        assert_eq!(
            serde_json::to_string(&SafetyZone::Danger).unwrap(),
            "\"danger\""
        );
        assert_eq!(SafetyZone::Moderate.as_str(), "moderate");
    }

    #[test]
    fn test_color_hex_values() {
        assert_eq!(ZoneColor::Green.hex(), "#2a9d8f");
        assert_eq!(ZoneColor::Yellow.hex(), "#e9c46a");
        assert_eq!(ZoneColor::Red.hex(), "#e63946");
    }
}
