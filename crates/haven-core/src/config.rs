//! Application configuration management.
//!
//! Handles loading, saving, and validating haven configuration:
//! - hazard zone radius used for operator designations
//! - geolocation watch options passed through to the sensing client
//! - the fallback map center served to rendering clients
//! - an optional override for the risk state directory

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HavenError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HavenConfig {
    /// Monitoring pipeline settings.
    pub monitor: MonitorConfig,

    /// Geolocation watch options.
    pub sensor: SensorConfig,

    /// Map rendering defaults.
    pub map: MapConfig,

    /// Persistence settings.
    pub storage: StorageConfig,
}

/// Monitoring pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Radius applied to operator hazard designations, in metres.
    pub hazard_radius_meters: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            hazard_radius_meters: 100.0,
        }
    }
}

/// Options for the external geolocation watch.
///
/// The core never polls the sensor itself; these values are handed to the
/// sensing client on request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Request the high-accuracy positioning mode.
    pub high_accuracy: bool,

    /// Maximum acceptable age of a cached position, in milliseconds.
    pub maximum_age_ms: u64,

    /// Time to wait for a position fix, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            maximum_age_ms: 30_000,
            timeout_ms: 10_000,
        }
    }
}

/// Map rendering defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Latitude shown before the first position fix arrives.
    pub fallback_latitude: f64,

    /// Longitude shown before the first position fix arrives.
    pub fallback_longitude: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            fallback_latitude: 22.5645,
            fallback_longitude: 72.9289,
        }
    }
}

/// Persistence settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for the risk state file. Platform default when unset.
    pub data_dir: Option<PathBuf>,
}

impl HavenConfig {
    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, unparsable, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HavenError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| HavenError::ConfigParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, falling back to defaults if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for an existing but broken file; a missing file is
    /// not an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| HavenError::ConfigParseError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The platform configuration file path.
    ///
    /// On Linux: `/etc/haven/config.toml`. Elsewhere the platform config
    /// directory is used.
    ///
    /// # Errors
    ///
    /// Returns an error if no config directory can be determined.
    pub fn default_path() -> Result<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            Ok(PathBuf::from("/etc/haven/config.toml"))
        }
        #[cfg(not(target_os = "linux"))]
        {
            let dirs = directories::ProjectDirs::from("", "", "haven").ok_or_else(|| {
                HavenError::ConfigValidationError("cannot determine config directory".into())
            })?;
            Ok(dirs.config_dir().join("config.toml"))
        }
    }

    /// Check all values for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`HavenError::ConfigValidationError`] naming the offending
    /// field.
    pub fn validate(&self) -> Result<()> {
        if !self.monitor.hazard_radius_meters.is_finite()
            || self.monitor.hazard_radius_meters <= 0.0
        {
            return Err(HavenError::ConfigValidationError(format!(
                "monitor.hazard_radius_meters must be positive, got {}",
                self.monitor.hazard_radius_meters
            )));
        }
        if self.sensor.timeout_ms == 0 {
            return Err(HavenError::ConfigValidationError(
                "sensor.timeout_ms must be non-zero".into(),
            ));
        }
        if !(-90.0..=90.0).contains(&self.map.fallback_latitude)
            || !(-180.0..=180.0).contains(&self.map.fallback_longitude)
        {
            return Err(HavenError::ConfigValidationError(format!(
                "map fallback center out of range: {}, {}",
                self.map.fallback_latitude, self.map.fallback_longitude
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_constants() {
        let config = HavenConfig::default();
        assert!((config.monitor.hazard_radius_meters - 100.0).abs() < f64::EPSILON);
        assert!(config.sensor.high_accuracy);
        assert_eq!(config.sensor.maximum_age_ms, 30_000);
        assert_eq!(config.sensor.timeout_ms, 10_000);
        assert!((config.map.fallback_latitude - 22.5645).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = HavenConfig::default();
        config.save(&path).unwrap();

        let loaded = HavenConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = HavenConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, HavenConfig::default());
    }

    #[test]
    fn test_load_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = HavenConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[monitor]\nhazard_radius_meters = 250.0\n").unwrap();

        let config = HavenConfig::load(&path).unwrap();
        assert!((config.monitor.hazard_radius_meters - 250.0).abs() < f64::EPSILON);
        assert_eq!(config.sensor, SensorConfig::default());
    }

    #[test]
    fn test_validation_rejects_bad_radius() {
        let mut config = HavenConfig::default();
        config.monitor.hazard_radius_meters = 0.0;
        assert!(config.validate().is_err());

        config.monitor.hazard_radius_meters = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_fallback_center() {
        let mut config = HavenConfig::default();
        config.map.fallback_latitude = 95.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = HavenConfig::default();
        config.sensor.timeout_ms = 0;
        assert!(config.validate().is_err());
    }
}
