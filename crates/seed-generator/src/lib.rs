//! Synthetic health data generator for the petcare-seed tool.
//!
//! This crate produces plausible longitudinal health measurements and
//! vaccination histories for a subject over a calendar window. All draws go
//! through one [`RandomSource`] per subject, so a seeded run is fully
//! reproducible.
//!
//! # Architecture
//!
//! ```text
//!  Subject + DateRange + RandomSource
//!                 │
//!                 ▼
//!  ┌──────────────────────────────┐
//!  │       SeriesGenerator        │
//!  │                              │
//!  │  CadenceScheduler  ─ due?    │
//!  │  TrendSimulator    ─ weight, │
//!  │                      length  │
//!  │  QuantityDraw      ─ counts  │
//!  │  CategoricalSampler─ labels  │
//!  │  TimestampAssigner ─ when    │
//!  └──────────────┬───────────────┘
//!                 │ per day
//!                 ▼
//!         Vec<MeasurementRecord>
//!
//!  VaccinationScheduler ─▶ Vec<VaccinationRecord>   (once per subject)
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::{NaiveDate, Utc};
//! use seed_core::{DateRange, Subject, SubjectDefaults};
//! use seed_generator::{RandomSource, SeriesGenerator};
//!
//! let subject = Subject::from_defaults(3, SubjectDefaults {
//!     owner_id: 1,
//!     name: "Milk".into(),
//!     species: "Cat".into(),
//!     base_weight: 2.6,
//!     date_of_birth: NaiveDate::from_ymd_opt(2021, 3, 15).unwrap(),
//!     gender: "Female".into(),
//!     color: "White".into(),
//!     medical_conditions: "None".into(),
//!     microchip_number: "CAT000001".into(),
//! });
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 6, 8).unwrap(),
//! ).unwrap();
//!
//! let mut series = SeriesGenerator::new(&subject, chrono_tz::Tz::UTC, RandomSource::seeded(42)).unwrap();
//! let created_at = Utc::now();
//! let records: Vec<_> = range
//!     .iter()
//!     .flat_map(|(offset, date)| series.day(offset, date, created_at).unwrap())
//!     .collect();
//! assert_eq!(records.len(), 8 * 6 + 3 + 2);
//! ```

pub mod generator;
pub mod generators;
pub mod profile;
pub mod random;

// Re-exports for convenience
pub use generator::SeriesGenerator;
pub use generators::cadence::CadenceScheduler;
pub use generators::categorical::CategoricalSampler;
pub use generators::quantity::{LinearBaseline, QuantityDraw};
pub use generators::timestamp::{TimeDraw, TimestampAssigner, TimingProfile};
pub use generators::trend::{Bounds, TrendProfile, TrendSimulator};
pub use generators::vaccination::{Tier, VaccinationScheduler, VaccineDefinition, STANDARD_VACCINES};
pub use profile::{Generation, MetricProfile};
pub use random::{DistributionError, RandomSource, WeightedTable};
