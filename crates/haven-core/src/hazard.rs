//! Operator-designated hazard zones.
//!
//! At most one hazard zone exists at any time. Designating a new zone
//! replaces the previous one immediately; there is no queuing and no expiry.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::geo::{distance_meters, Coordinate};

/// A circular region that forces a danger classification while the user is
/// inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "center": { "latitude": 22.5645, "longitude": 72.9289 },
    "radius_meters": 100.0
}))]
pub struct HazardZone {
    /// Center of the zone.
    pub center: Coordinate,

    /// Radius in metres. Always positive.
    #[schema(example = 100.0, exclusive_minimum = 0.0)]
    pub radius_meters: f64,
}

impl HazardZone {
    /// Whether the given point lies within the zone (boundary inclusive).
    #[must_use]
    pub fn contains(&self, point: &Coordinate) -> bool {
        distance_meters(point, &self.center) <= self.radius_meters
    }
}

/// Holder for the single designated hazard zone.
///
/// Replace-on-designate, last-writer-wins. Purely in-memory; no failure
/// modes.
#[derive(Debug, Clone, Default)]
pub struct HazardZoneRegistry {
    zone: Option<HazardZone>,
}

impl HazardZoneRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { zone: None }
    }

    /// Replace any existing zone with a new one centered on `center`.
    pub fn designate(&mut self, center: Coordinate, radius_meters: f64) -> &HazardZone {
        self.zone.insert(HazardZone {
            center,
            radius_meters,
        })
    }

    /// The currently designated zone, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&HazardZone> {
        self.zone.as_ref()
    }

    /// Remove the designated zone. Returns whether one existed.
    pub fn clear(&mut self) -> bool {
        self.zone.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_starts_empty() {
        let registry = HazardZoneRegistry::new();
        assert!(registry.current().is_none());
    }

    #[test]
    fn test_designate_replaces_prior_zone() {
        let mut registry = HazardZoneRegistry::new();
        registry.designate(Coordinate::new(10.0, 10.0), 100.0);
        registry.designate(Coordinate::new(20.0, 20.0), 100.0);

        let zone = registry.current().unwrap();
        assert!((zone.center.latitude - 20.0).abs() < f64::EPSILON);
        assert!((zone.center.longitude - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clear_removes_zone() {
        let mut registry = HazardZoneRegistry::new();
        registry.designate(Coordinate::new(10.0, 10.0), 100.0);
        assert!(registry.clear());
        assert!(registry.current().is_none());
        assert!(!registry.clear());
    }

    #[test]
    fn test_contains_center_and_boundary() {
        let zone = HazardZone {
            center: Coordinate::new(10.0, 10.0),
            radius_meters: 100.0,
        };
        assert!(zone.contains(&Coordinate::new(10.0, 10.0)));

        // ~90 m north of center: inside.
        assert!(zone.contains(&Coordinate::new(10.0008, 10.0)));

        // ~220 m north of center: outside.
        assert!(!zone.contains(&Coordinate::new(10.002, 10.0)));
    }
}
