//! Risk state persistence sink.
//!
//! The processor publishes its classification results through a key-value
//! sink consumed by other parts of the surrounding application. Writes are
//! fire-and-forget: the pipeline never blocks or fails on a sink problem,
//! and no acknowledgement or retry is modeled.
//!
//! The key names and the lowercase zone values are a verbatim cross-boundary
//! contract; see [`RiskKey`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{HavenError, Result};

/// Keys understood by the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskKey {
    /// Current zone as `safe` / `moderate` / `danger`.
    RiskLevel,
    /// Current safety score as a decimal string.
    SafetyScore,
    /// Reason recorded by the last escalation.
    SosReason,
}

impl RiskKey {
    /// The verbatim key name used across the boundary.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RiskLevel => "riskLevel",
            Self::SafetyScore => "safetyScore",
            Self::SosReason => "sosReason",
        }
    }
}

/// Fire-and-forget key-value sink for risk state.
///
/// Implementations must make `write` infallible from the caller's point of
/// view: persistence problems are logged, never propagated.
pub trait RiskSink: Send + Sync {
    /// Record `value` under `key`, last write wins.
    fn write(&mut self, key: RiskKey, value: &str);

    /// Read back the last value written under `key`, if any.
    fn read(&self, key: RiskKey) -> Option<String>;
}

/// In-memory sink used in tests and as a serving cache.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: BTreeMap<RiskKey, String>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RiskSink for MemorySink {
    fn write(&mut self, key: RiskKey, value: &str) {
        self.entries.insert(key, value.to_string());
    }

    fn read(&self, key: RiskKey) -> Option<String> {
        self.entries.get(&key).cloned()
    }
}

/// Sink that persists the key-value map as a JSON file.
///
/// The whole map is rewritten on every write; at three keys this is cheaper
/// than being clever. A write failure is logged and the in-memory view keeps
/// serving reads.
#[derive(Debug)]
pub struct JsonFileSink {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileSink {
    /// Open a sink at `path`, loading any previously persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed. A
    /// missing file is not an error; it is created on first write.
    pub fn open(path: PathBuf) -> Result<Self> {
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| {
                HavenError::PersistenceError(format!(
                    "failed to parse {}: {e}",
                    path.display()
                ))
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    /// The default risk state location.
    ///
    /// On Linux: `/var/lib/haven/risk.json`. Elsewhere the platform data
    /// directory is used.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory can be determined.
    pub fn default_path() -> Result<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            Ok(PathBuf::from("/var/lib/haven/risk.json"))
        }
        #[cfg(not(target_os = "linux"))]
        {
            let dirs = directories::ProjectDirs::from("", "", "haven").ok_or_else(|| {
                HavenError::PersistenceError("cannot determine data directory".into())
            })?;
            Ok(dirs.data_dir().join("risk.json"))
        }
    }

    /// Where this sink persists to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            HavenError::PersistenceError(format!("failed to serialize risk state: {e}"))
        })?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl RiskSink for JsonFileSink {
    fn write(&mut self, key: RiskKey, value: &str) {
        self.entries.insert(key.as_str().to_string(), value.to_string());
        if let Err(e) = self.flush() {
            tracing::warn!(key = key.as_str(), error = %e, "risk sink write failed");
        }
    }

    fn read(&self, key: RiskKey) -> Option<String> {
        self.entries.get(key.as_str()).cloned()
    }
}
