//! Geographic coordinates and great-circle distance.
//!
//! Distance is computed with the haversine formula over a spherical Earth
//! model (mean radius). This is accurate to well under a metre at the scales
//! haven cares about (hazard zones of tens to hundreds of metres).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{HavenError, Result};

/// Mean Earth radius in metres, per the spherical Earth model.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A WGS 84 coordinate pair in decimal degrees.
///
/// Latitude must be within `[-90, 90]` and longitude within `[-180, 180]`.
/// Construction via struct literal does not enforce the ranges; collaborators
/// accepting untrusted input should go through [`Coordinate::validated`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "latitude": 22.5645, "longitude": 72.9289 }))]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    #[schema(example = 22.5645, minimum = -90.0, maximum = 90.0)]
    pub latitude: f64,

    /// Longitude in decimal degrees.
    #[schema(example = 72.9289, minimum = -180.0, maximum = 180.0)]
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate without validation.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a coordinate, rejecting NaN and out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`HavenError::InvalidCoordinate`] if either component is NaN
    /// or outside its valid range.
    pub fn validated(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self {
            latitude,
            longitude,
        };
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(HavenError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// Whether both components are finite and within range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Great-circle surface distance between two coordinates, in metres.
///
/// Symmetric, and zero (within floating tolerance) for identical points.
/// Behavior for invalid coordinates is unspecified; callers validate first.
#[must_use]
pub fn distance_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    EARTH_RADIUS_METERS * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinate::new(22.5645, 72.9289);
        let b = Coordinate::new(22.5700, 72.9400);
        assert!((distance_meters(&a, &b) - distance_meters(&b, &a)).abs() < 1e-9);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let a = Coordinate::new(-33.8688, 151.2093);
        assert!(distance_meters(&a, &a).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // One degree of latitude is ~111.19 km on the mean-radius sphere.
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        let d = distance_meters(&a, &b);
        assert!((d - 111_194.9).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_short_distance_magnitude() {
        // ~100 m north of the origin.
        let a = Coordinate::new(22.5645, 72.9289);
        let b = Coordinate::new(22.5645 + 0.0009, 72.9289);
        let d = distance_meters(&a, &b);
        assert!(d > 90.0 && d < 110.0, "got {d}");
    }

    #[test]
    fn test_validated_accepts_in_range() {
        assert!(Coordinate::validated(90.0, -180.0).is_ok());
        assert!(Coordinate::validated(-90.0, 180.0).is_ok());
        assert!(Coordinate::validated(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_validated_rejects_out_of_range() {
        assert!(Coordinate::validated(90.1, 0.0).is_err());
        assert!(Coordinate::validated(0.0, -180.5).is_err());
        assert!(Coordinate::validated(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let a = Coordinate::new(22.5645, 72.9289);
        let json = serde_json::to_string(&a).unwrap();
        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
