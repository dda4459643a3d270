//! In-memory registry and sink.

use async_trait::async_trait;
use seed_core::{
    MeasurementRecord, Owner, OwnerId, Record, RecordId, RecordKind, Subject, SubjectDefaults,
    SubjectId, VaccinationRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::store::{Sink, StoreError, SubjectRegistry};

/// Everything a store holds; also the on-disk snapshot format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub owners: BTreeMap<OwnerId, Owner>,
    #[serde(default)]
    pub subjects: BTreeMap<SubjectId, Subject>,
    #[serde(default)]
    pub health_statuses: BTreeMap<RecordId, MeasurementRecord>,
    #[serde(default)]
    pub vaccinations: BTreeMap<RecordId, VaccinationRecord>,
    #[serde(default)]
    pub next_id: RecordId,
}

impl StoreState {
    fn allocate_id(&mut self) -> RecordId {
        self.next_id += 1;
        self.next_id
    }
}

/// Registry and sink backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that starts with the given owners.
    pub fn with_owners(owners: impl IntoIterator<Item = Owner>) -> Self {
        let state = StoreState {
            owners: owners.into_iter().map(|o| (o.id, o)).collect(),
            ..StoreState::default()
        };
        Self::from_state(state)
    }

    /// Wrap an existing state, e.g. one loaded from a snapshot.
    pub fn from_state(state: StoreState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> StoreState {
        self.state.read().await.clone()
    }

    /// Measurements of a subject, in creation order.
    pub async fn measurements(&self, subject: SubjectId) -> Vec<MeasurementRecord> {
        self.state
            .read()
            .await
            .health_statuses
            .values()
            .filter(|r| r.subject_id() == subject)
            .cloned()
            .collect()
    }

    /// Vaccinations of a subject, in creation order.
    pub async fn vaccinations(&self, subject: SubjectId) -> Vec<VaccinationRecord> {
        self.state
            .read()
            .await
            .vaccinations
            .values()
            .filter(|r| r.subject_id() == subject)
            .cloned()
            .collect()
    }

    /// Number of stored records of a kind for a subject.
    pub async fn count(&self, subject: SubjectId, kind: RecordKind) -> usize {
        let state = self.state.read().await;
        match kind {
            RecordKind::Measurement => state
                .health_statuses
                .values()
                .filter(|r| r.subject_id() == subject)
                .count(),
            RecordKind::Vaccination => state
                .vaccinations
                .values()
                .filter(|r| r.subject_id() == subject)
                .count(),
        }
    }
}

#[async_trait]
impl SubjectRegistry for MemoryStore {
    async fn owner(&self, id: OwnerId) -> Result<Option<Owner>, StoreError> {
        Ok(self.state.read().await.owners.get(&id).cloned())
    }

    async fn get_or_create(
        &self,
        id: SubjectId,
        defaults: SubjectDefaults,
    ) -> Result<(Subject, bool), StoreError> {
        let mut state = self.state.write().await;

        if let Some(subject) = state.subjects.get(&id) {
            return Ok((subject.clone(), false));
        }
        if !state.owners.contains_key(&defaults.owner_id) {
            return Err(StoreError::UnknownOwner(defaults.owner_id));
        }

        let subject = Subject::from_defaults(id, defaults);
        state.subjects.insert(id, subject.clone());
        Ok((subject, true))
    }

    async fn get(&self, id: SubjectId) -> Result<Option<Subject>, StoreError> {
        Ok(self.state.read().await.subjects.get(&id).cloned())
    }
}

#[async_trait]
impl Sink for MemoryStore {
    async fn delete_all(&self, subject: SubjectId, kind: RecordKind) -> Result<u64, StoreError> {
        let mut state = self.state.write().await;
        let removed = match kind {
            RecordKind::Measurement => {
                let before = state.health_statuses.len();
                state.health_statuses.retain(|_, r| r.subject_id() != subject);
                before - state.health_statuses.len()
            }
            RecordKind::Vaccination => {
                let before = state.vaccinations.len();
                state.vaccinations.retain(|_, r| r.subject_id() != subject);
                before - state.vaccinations.len()
            }
        };
        Ok(removed as u64)
    }

    async fn create(&self, record: Record) -> Result<RecordId, StoreError> {
        let mut state = self.state.write().await;

        let subject = record.subject_id();
        if !state.subjects.contains_key(&subject) {
            return Err(StoreError::UnknownSubject(subject));
        }

        let id = state.allocate_id();
        match record {
            Record::Measurement(m) => {
                state.health_statuses.insert(id, m);
            }
            Record::Vaccination(v) => {
                state.vaccinations.insert(id, v);
            }
        }
        Ok(id)
    }
}
