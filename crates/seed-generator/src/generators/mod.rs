//! Individual generators the series generator is composed of.
//!
//! Each generator draws from a caller-provided [`RandomSource`](crate::RandomSource)
//! and holds no randomness of its own.

pub mod cadence;
pub mod categorical;
pub mod quantity;
pub mod timestamp;
pub mod trend;
pub mod vaccination;
