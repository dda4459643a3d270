//! Core types for the petcare-seed generator.
//!
//! This crate provides the foundational types shared by the generator,
//! the stores and the CLI:
//!
//! - [`Subject`] / [`Owner`] - the pets data is generated for, and who owns them
//! - [`MetricKind`] - closed set of tracked health metrics with units and cadences
//! - [`MeasurementRecord`] / [`VaccinationRecord`] - generated output rows
//! - [`DateRange`] - inclusive calendar window a run covers
//! - [`SeedConfig`] - run configuration loaded from YAML
//!
//! # Architecture
//!
//! ```text
//! seed-core (this crate)
//!    │
//!    ├─── seed-generator  (time-series and vaccination generators)
//!    │
//!    ├─── seed-store      (Sink / SubjectRegistry and their backends)
//!    │
//!    └─── petcare-seed    (orchestrator + CLI)
//! ```

pub mod config;
pub mod metric;
pub mod range;
pub mod record;
pub mod subject;

// Re-exports for convenience
pub use config::{ConfigError, OwnerConfig, SeedConfig, SubjectConfig};
pub use metric::{Cadence, CoatCondition, Label, MetricKind, Mood, Unit};
pub use range::{DateRange, InvalidRange};
pub use record::{
    MeasurementRecord, Reading, Record, RecordError, RecordId, RecordKind, VaccinationRecord,
    VaccinationStatus,
};
pub use subject::{Owner, OwnerId, Subject, SubjectDefaults, SubjectId};
