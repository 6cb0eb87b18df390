//! Application state shared across handlers.
//!
//! All external events (sensor samples, operator designations, dismissals)
//! mutate the processor under a single write lock, preserving the serial
//! event-delivery model of the core pipeline: no two handlers ever run the
//! pipeline concurrently.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use haven_core::{HavenConfig, JsonFileSink, RiskSink, SampleProcessor};
use tokio::sync::RwLock;

/// Shared application state behind a read-write lock.
pub type SharedState = Arc<RwLock<AppState>>;

/// Application state owned by the server.
pub struct AppState {
    /// Loaded configuration.
    pub config: HavenConfig,

    /// The safety classification pipeline.
    pub processor: SampleProcessor,

    /// Where the active configuration was loaded from.
    pub config_path: PathBuf,

    started_at: Instant,
}

impl AppState {
    /// Load configuration and wire up the pipeline with file-backed
    /// persistence.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the risk state file is
    /// broken, or if no platform directories can be determined.
    pub fn new() -> anyhow::Result<Self> {
        let config_path = HavenConfig::default_path()?;
        let config = HavenConfig::load_or_default(&config_path)?;
        config.validate()?;

        let sink_path = match &config.storage.data_dir {
            Some(dir) => dir.join("risk.json"),
            None => JsonFileSink::default_path()?,
        };
        let sink = JsonFileSink::open(sink_path)?;

        Ok(Self::with_config_and_sink(config, config_path, Box::new(sink)))
    }

    /// Build state from preconstructed parts. Used by `new` and by tests.
    #[must_use]
    pub fn with_config_and_sink(
        config: HavenConfig,
        config_path: PathBuf,
        sink: Box<dyn RiskSink>,
    ) -> Self {
        let processor = SampleProcessor::new(&config, sink);
        Self {
            config,
            processor,
            config_path,
            started_at: Instant::now(),
        }
    }

    /// Wrap this state for sharing across handlers.
    #[must_use]
    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    /// Seconds since the server started.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
