//! petcare-seed
//!
//! Seeds a pet health tracking application with realistic longitudinal data:
//! daily and periodic health measurements plus vaccination histories for a
//! fixed set of pets over a calendar window.
//!
//! # Crates
//!
//! - `seed_core` - data model, date ranges and YAML configuration
//! - `seed_generator` - trend, categorical, cadence, timestamp and
//!   vaccination generators
//! - `seed_store` - subject registry and record sink traits with in-memory
//!   and JSON file implementations
//!
//! This crate ties them together with [`GenerationOrchestrator`], which runs
//! the clear-then-write cycle per subject, and [`RunReport`], which prints
//! the summary of a run.
//!
//! # CLI Usage
//!
//! ```bash
//! # Seed the default pets for user 1 into petcare-seed.json
//! petcare-seed
//!
//! # Reproducible run for one pet, custom config, nothing written
//! petcare-seed --config seed.yaml --seed 42 --subjects 3 --dry-run
//! ```

pub mod orchestrator;
pub mod summary;

pub use orchestrator::{GenerationOrchestrator, SeedError};
pub use summary::{GenerationSummary, RunReport};
