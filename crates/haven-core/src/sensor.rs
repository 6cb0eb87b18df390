//! Sensor event types: location samples and sensor error kinds.
//!
//! Samples arrive from an external position source (a browser geolocation
//! watch or any collaborator speaking the same shape) and are consumed
//! immediately by the processor; only the last sample's diagnostic fields are
//! retained.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::geo::Coordinate;

/// Accuracy assumed when the sensor omits the accuracy field, in metres.
pub const DEFAULT_ACCURACY_METERS: f64 = 20.0;

/// A single position update from the location sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "coordinate": { "latitude": 22.5645, "longitude": 72.9289 },
    "accuracy_meters": 12.5,
    "speed_mps": 1.4,
    "altitude_meters": 31.0,
    "timestamp_ms": 1754550000000_i64
}))]
pub struct LocationSample {
    /// Position of the sample.
    pub coordinate: Coordinate,

    /// Reported horizontal accuracy in metres, if the sensor provided one.
    #[schema(example = 12.5, minimum = 0.0)]
    pub accuracy_meters: Option<f64>,

    /// Ground speed in metres per second, if known.
    #[schema(example = 1.4)]
    pub speed_mps: Option<f64>,

    /// Altitude in metres, if known.
    #[schema(example = 31.0)]
    pub altitude_meters: Option<f64>,

    /// Sample time as milliseconds since the Unix epoch.
    #[schema(example = 1754550000000_i64)]
    pub timestamp_ms: i64,
}

impl LocationSample {
    /// Reported accuracy, falling back to [`DEFAULT_ACCURACY_METERS`].
    #[must_use]
    pub fn accuracy_or_default(&self) -> f64 {
        self.accuracy_meters.unwrap_or(DEFAULT_ACCURACY_METERS)
    }
}

/// Error kinds delivered by the location sensor.
///
/// Mirrors the geolocation error codes of the sensing client. Only
/// `permission_denied` warrants a user-facing advisory; the rest are
/// transient and monitoring simply continues with the next sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SensorErrorKind {
    /// The user denied location access.
    PermissionDenied,
    /// The sensor could not produce a position fix.
    PositionUnavailable,
    /// The position request timed out.
    Timeout,
}

impl SensorErrorKind {
    /// Stable string form, matching the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission_denied",
            Self::PositionUnavailable => "position_unavailable",
            Self::Timeout => "timeout",
        }
    }

    /// Whether this error should surface a user-facing advisory.
    #[must_use]
    pub const fn requires_user_advisory(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}
