//! Registry and sink traits.
//!
//! This module defines the storage-agnostic interfaces the generator
//! depends on, plus the shared error type.

use async_trait::async_trait;
use seed_core::{Owner, OwnerId, Record, RecordId, RecordKind, Subject, SubjectDefaults, SubjectId};

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A subject references an owner that does not exist
    #[error("Owner with ID {0} does not exist")]
    UnknownOwner(OwnerId),

    /// A record references a subject that does not exist
    #[error("Subject with ID {0} does not exist")]
    UnknownSubject(SubjectId),
}

/// Lookup of owners and subjects.
#[async_trait]
pub trait SubjectRegistry: Send + Sync {
    /// Fetch an owner, `None` if it does not exist.
    async fn owner(&self, id: OwnerId) -> Result<Option<Owner>, StoreError>;

    /// Fetch a subject, creating it from `defaults` if missing.
    ///
    /// Returns the subject and whether it was created. An existing subject
    /// is returned unchanged; the defaults are ignored.
    async fn get_or_create(
        &self,
        id: SubjectId,
        defaults: SubjectDefaults,
    ) -> Result<(Subject, bool), StoreError>;

    /// Fetch a subject, `None` if it does not exist.
    async fn get(&self, id: SubjectId) -> Result<Option<Subject>, StoreError>;
}

/// Destination of generated records.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Delete every record of `kind` for a subject, returning how many were removed.
    async fn delete_all(&self, subject: SubjectId, kind: RecordKind) -> Result<u64, StoreError>;

    /// Store a record, returning its new id.
    async fn create(&self, record: Record) -> Result<RecordId, StoreError>;
}
