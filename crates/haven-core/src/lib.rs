//! # haven-core
//!
//! Core safety-classification pipeline for haven, a personal-safety location
//! monitor.
//!
//! This crate provides:
//! - Great-circle distance math over WGS 84 coordinates
//! - Hazard zone designation (single replaceable zone)
//! - Discrete safety zone classification with scores and display colors
//! - The advisory overlay state machine
//! - The sample processor orchestrating classification, persistence, and
//!   overlay display
//!
//! ## Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`geo`] - Coordinates and haversine distance
//! - [`sensor`] - Location samples and sensor error kinds
//! - [`hazard`] - Hazard zone type and single-slot registry
//! - [`classify`] - Zone classification policy
//! - [`overlay`] - Advisory overlay state machine
//! - [`monitor`] - The sample processing orchestrator
//! - [`sink`] - Fire-and-forget risk state persistence
//! - [`config`] - Application configuration loading, saving, and validation
//! - [`error`] - Unified error types for the crate

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(missing_docs)]

pub mod classify;
pub mod config;
pub mod error;
pub mod geo;
pub mod hazard;
pub mod monitor;
pub mod overlay;
pub mod sensor;
pub mod sink;

// Re-export primary types for convenience
pub use classify::{classify, SafetyZone, ZoneClassification, ZoneColor};
pub use config::{HavenConfig, MapConfig, MonitorConfig, SensorConfig, StorageConfig};
pub use error::{HavenError, Result};
pub use geo::{distance_meters, Coordinate};
pub use hazard::{HazardZone, HazardZoneRegistry};
pub use monitor::{
    EscalationRecord, MonitoringState, SampleDiagnostics, SampleOutcome, SampleProcessor,
};
pub use overlay::{OverlayRequest, OverlayState, OverlayStateMachine};
pub use sensor::{LocationSample, SensorErrorKind, DEFAULT_ACCURACY_METERS};
pub use sink::{JsonFileSink, MemorySink, RiskKey, RiskSink};
