//! Generation integration tests.
//!
//! These tests drive the orchestrator against the memory and file stores. Each test:
//! 1. Registers the built-in owner and pets in a fresh store
//! 2. Runs generation over a fixed date range (fixed seed where it matters)
//! 3. Checks the stored records against counts, bounds and pairing rules

mod failures;
mod lifecycle;
mod properties;
mod snapshot;
mod support;
