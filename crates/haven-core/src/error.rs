//! Unified error types for the haven core library.
//!
//! One enum covers every failure mode in the pipeline. The taxonomy follows
//! how the errors are handled: permission denial is surfaced to the user,
//! transient sensor problems are logged and ignored, invalid coordinates are
//! a caller precondition violation rejected at the boundary, and config or
//! persistence problems carry enough context to act on.

use std::path::PathBuf;
use thiserror::Error;

/// The unified error type for all haven operations.
#[derive(Debug, Error)]
pub enum HavenError {
    // =========================================================================
    // SENSOR ERRORS
    // =========================================================================
    /// The user denied location access; monitoring cannot proceed.
    #[error(
        "Location permission is required for live monitoring. Enable location access in the browser settings."
    )]
    SensorPermissionDenied,

    /// The location sensor is present but cannot produce a fix right now.
    #[error("Location sensor unavailable: {0}")]
    SensorUnavailable(String),

    /// A transient sensor fault; monitoring continues with the next sample.
    #[error("Transient sensor error: {0}")]
    SensorTransient(String),

    /// A coordinate outside the valid latitude/longitude ranges.
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate {
        /// Offending latitude.
        latitude: f64,
        /// Offending longitude.
        longitude: f64,
    },

    // =========================================================================
    // CONFIGURATION ERRORS
    // =========================================================================
    /// The configuration file was not found at the expected path.
    #[error("Configuration file not found at: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The configuration file exists but could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParseError(String),

    /// The configuration was parsed but contains invalid values.
    #[error("Configuration validation failed: {0}")]
    ConfigValidationError(String),

    // =========================================================================
    // PERSISTENCE & I/O ERRORS
    // =========================================================================
    /// An error occurred while persisting or reading data.
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    /// A low-level I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized [`Result`] type for haven operations.
pub type Result<T> = std::result::Result<T, HavenError>;

impl HavenError {
    /// Returns `true` if this error originated in the location sensor.
    #[inline]
    #[must_use]
    pub fn is_sensor_error(&self) -> bool {
        matches!(
            self,
            Self::SensorPermissionDenied
                | Self::SensorUnavailable(_)
                | Self::SensorTransient(_)
                | Self::InvalidCoordinate { .. }
        )
    }

    /// Returns `true` if this error is related to configuration.
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound(_) | Self::ConfigParseError(_) | Self::ConfigValidationError(_)
        )
    }

    /// Returns `true` if this error is related to I/O or persistence.
    #[inline]
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::PersistenceError(_) | Self::IoError(_))
    }

    /// Returns `true` if this error represents an expected operational state.
    ///
    /// Transient sensor faults are part of normal operation; the pipeline
    /// logs them and waits for the next sample.
    #[inline]
    #[must_use]
    pub fn is_expected_state(&self) -> bool {
        matches!(self, Self::SensorTransient(_))
    }

    /// Returns `true` if this error is likely recoverable without user
    /// intervention.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SensorTransient(_) | Self::SensorUnavailable(_))
    }

    /// Returns an HTTP-appropriate status code for this error.
    #[inline]
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 403 Forbidden - the user withheld a required permission
            Self::SensorPermissionDenied => 403,

            // 404 Not Found
            Self::ConfigNotFound(_) => 404,

            // 422 Unprocessable Entity - semantic errors
            Self::InvalidCoordinate { .. }
            | Self::ConfigParseError(_)
            | Self::ConfigValidationError(_) => 422,

            // 500 Internal Server Error - server-side issues
            Self::PersistenceError(_) | Self::IoError(_) => 500,

            // 503 Service Unavailable - sensor issues
            Self::SensorUnavailable(_) | Self::SensorTransient(_) => 503,
        }
    }

    /// Returns a machine-readable error code for API responses.
    #[inline]
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SensorPermissionDenied => "SENSOR_PERMISSION_DENIED",
            Self::SensorUnavailable(_) => "SENSOR_UNAVAILABLE",
            Self::SensorTransient(_) => "SENSOR_TRANSIENT",
            Self::InvalidCoordinate { .. } => "INVALID_COORDINATE",
            Self::ConfigNotFound(_) => "CONFIG_NOT_FOUND",
            Self::ConfigParseError(_) => "CONFIG_PARSE_ERROR",
            Self::ConfigValidationError(_) => "CONFIG_VALIDATION_ERROR",
            Self::PersistenceError(_) => "PERSISTENCE_ERROR",
            Self::IoError(_) => "IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoErr, ErrorKind};

    #[test]
    fn test_sensor_error_classification() {
        assert!(HavenError::SensorPermissionDenied.is_sensor_error());
        assert!(HavenError::SensorUnavailable("no fix".into()).is_sensor_error());
        assert!(HavenError::SensorTransient("timeout".into()).is_sensor_error());
        assert!(HavenError::InvalidCoordinate {
            latitude: 91.0,
            longitude: 0.0
        }
        .is_sensor_error());

        assert!(!HavenError::PersistenceError("disk full".into()).is_sensor_error());
    }

    #[test]
    fn test_config_error_classification() {
        assert!(HavenError::ConfigNotFound(PathBuf::from("/test")).is_config_error());
        assert!(HavenError::ConfigParseError("syntax error".into()).is_config_error());
        assert!(HavenError::ConfigValidationError("bad radius".into()).is_config_error());

        assert!(!HavenError::SensorPermissionDenied.is_config_error());
    }

    #[test]
    fn test_io_error_classification() {
        assert!(HavenError::PersistenceError("disk full".into()).is_io_error());
        assert!(HavenError::IoError(IoErr::new(ErrorKind::NotFound, "test")).is_io_error());

        assert!(!HavenError::SensorPermissionDenied.is_io_error());
    }

    #[test]
    fn test_expected_and_recoverable_states() {
        assert!(HavenError::SensorTransient("timeout".into()).is_expected_state());
        assert!(HavenError::SensorTransient("timeout".into()).is_recoverable());
        assert!(HavenError::SensorUnavailable("no fix".into()).is_recoverable());

        assert!(!HavenError::SensorPermissionDenied.is_recoverable());
        assert!(!HavenError::SensorPermissionDenied.is_expected_state());
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(HavenError::SensorPermissionDenied.http_status_code(), 403);
        assert_eq!(
            HavenError::ConfigNotFound(PathBuf::new()).http_status_code(),
            404
        );
        assert_eq!(
            HavenError::InvalidCoordinate {
                latitude: 91.0,
                longitude: 0.0
            }
            .http_status_code(),
            422
        );
        assert_eq!(
            HavenError::PersistenceError("error".into()).http_status_code(),
            500
        );
        assert_eq!(
            HavenError::SensorTransient("timeout".into()).http_status_code(),
            503
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            HavenError::SensorPermissionDenied.error_code(),
            "SENSOR_PERMISSION_DENIED"
        );
        assert_eq!(
            HavenError::InvalidCoordinate {
                latitude: 91.0,
                longitude: 0.0
            }
            .error_code(),
            "INVALID_COORDINATE"
        );
        assert_eq!(
            HavenError::ConfigNotFound(PathBuf::new()).error_code(),
            "CONFIG_NOT_FOUND"
        );
    }

    #[test]
    fn test_error_display_messages() {
        let err = HavenError::SensorPermissionDenied;
        assert!(format!("{err}").contains("Location permission is required"));

        let err = HavenError::InvalidCoordinate {
            latitude: 91.0,
            longitude: 0.0,
        };
        assert!(format!("{err}").contains("91"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoErr::new(ErrorKind::NotFound, "file not found");
        let haven_err: HavenError = io_err.into();
        assert!(matches!(haven_err, HavenError::IoError(_)));
        assert!(haven_err.is_io_error());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<HavenError>();
        assert_sync::<HavenError>();
    }
}
