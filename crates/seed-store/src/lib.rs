//! Subject registry and record sinks for petcare-seed.
//!
//! The generator never touches storage directly. It talks to two
//! collaborators defined here:
//!
//! - [`SubjectRegistry`] - looks up owners and subjects, creating subjects on demand
//! - [`Sink`] - clears and stores generated records
//!
//! ## Storage Backends
//!
//! - [`MemoryStore`] - keeps everything in memory (tests, dry runs)
//! - [`FileStore`] - memory store persisted as a JSON snapshot file

mod file;
mod memory;
pub mod store;

// Re-export store traits and types
pub use store::{Sink, StoreError, SubjectRegistry};

// Re-export storage implementations
pub use file::FileStore;
pub use memory::{MemoryStore, StoreState};
