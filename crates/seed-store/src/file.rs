//! JSON snapshot backed store.

use async_trait::async_trait;
use seed_core::{Owner, OwnerId, Record, RecordId, RecordKind, Subject, SubjectDefaults, SubjectId};
use std::path::{Path, PathBuf};

use crate::memory::{MemoryStore, StoreState};
use crate::store::{Sink, StoreError, SubjectRegistry};

/// Memory store that loads from and persists to a single JSON file.
///
/// Writes go to memory; nothing reaches disk until [`FileStore::persist`].
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    /// Open a snapshot file.
    ///
    /// A missing file starts an empty store. `owners` are added when not
    /// already present, existing owners are kept as stored.
    pub fn open(
        path: impl Into<PathBuf>,
        owners: impl IntoIterator<Item = Owner>,
    ) -> Result<Self, StoreError> {
        let path = path.into();

        let mut state = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let state: StoreState = serde_json::from_str(&content)?;
            tracing::debug!(
                "Loaded snapshot {} ({} subjects, {} measurements, {} vaccinations)",
                path.display(),
                state.subjects.len(),
                state.health_statuses.len(),
                state.vaccinations.len()
            );
            state
        } else {
            tracing::debug!("No snapshot at {}, starting empty", path.display());
            StoreState::default()
        };

        for owner in owners {
            state.owners.entry(owner.id).or_insert(owner);
        }

        Ok(Self {
            path,
            inner: MemoryStore::from_state(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The in-memory view.
    pub fn memory(&self) -> &MemoryStore {
        &self.inner
    }

    /// Write the current state to the snapshot file.
    ///
    /// The snapshot is written to a sibling temp file and renamed into
    /// place, so a crash never leaves a truncated file behind.
    pub async fn persist(&self) -> Result<(), StoreError> {
        let state = self.inner.snapshot().await;
        let json = serde_json::to_string_pretty(&state)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::info!("Stored snapshot to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl SubjectRegistry for FileStore {
    async fn owner(&self, id: OwnerId) -> Result<Option<Owner>, StoreError> {
        self.inner.owner(id).await
    }

    async fn get_or_create(
        &self,
        id: SubjectId,
        defaults: SubjectDefaults,
    ) -> Result<(Subject, bool), StoreError> {
        self.inner.get_or_create(id, defaults).await
    }

    async fn get(&self, id: SubjectId) -> Result<Option<Subject>, StoreError> {
        self.inner.get(id).await
    }
}

#[async_trait]
impl Sink for FileStore {
    async fn delete_all(&self, subject: SubjectId, kind: RecordKind) -> Result<u64, StoreError> {
        self.inner.delete_all(subject, kind).await
    }

    async fn create(&self, record: Record) -> Result<RecordId, StoreError> {
        self.inner.create(record).await
    }
}
