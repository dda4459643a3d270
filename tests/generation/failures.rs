//! Error paths: missing subjects, bad ranges, sink failures and cancellation.

use crate::support::*;
use async_trait::async_trait;
use petcare_seed::{GenerationOrchestrator, SeedError};
use seed_core::{
    MetricKind, Owner, OwnerId, Record, RecordId, RecordKind, SeedConfig, Subject,
    SubjectDefaults, SubjectId,
};
use seed_store::{MemoryStore, Sink, StoreError, SubjectRegistry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Memory store that counts calls and can fail or cancel after a number of writes.
#[derive(Default)]
struct ObservedStore {
    inner: MemoryStore,
    registry_calls: AtomicUsize,
    sink_calls: AtomicUsize,
    fail_after: Option<usize>,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl ObservedStore {
    async fn with_default_pets() -> Self {
        let config = SeedConfig::default();
        let inner = MemoryStore::with_owners(config.owners.iter().map(Owner::from));
        for subject in &config.subjects {
            inner
                .get_or_create(subject.id, subject.defaults(1))
                .await
                .unwrap();
        }
        Self {
            inner,
            ..Self::default()
        }
    }
}

#[async_trait]
impl SubjectRegistry for ObservedStore {
    async fn owner(&self, id: OwnerId) -> Result<Option<Owner>, StoreError> {
        self.registry_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.owner(id).await
    }

    async fn get_or_create(
        &self,
        id: SubjectId,
        defaults: SubjectDefaults,
    ) -> Result<(Subject, bool), StoreError> {
        self.registry_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_or_create(id, defaults).await
    }

    async fn get(&self, id: SubjectId) -> Result<Option<Subject>, StoreError> {
        self.registry_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(id).await
    }
}

#[async_trait]
impl Sink for ObservedStore {
    async fn delete_all(&self, subject: SubjectId, kind: RecordKind) -> Result<u64, StoreError> {
        self.sink_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_all(subject, kind).await
    }

    async fn create(&self, record: Record) -> Result<RecordId, StoreError> {
        let writes = self.sink_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_after.is_some_and(|n| writes > n) {
            return Err(StoreError::Io(std::io::Error::other("disk full")));
        }
        if let Some((n, token)) = &self.cancel_after {
            if writes >= *n {
                token.cancel();
            }
        }
        self.inner.create(record).await
    }
}

#[tokio::test]
async fn test_unknown_subject() {
    let (_store, orchestrator) = seeded_store().await;

    let err = orchestrator
        .generate_range(99, first_week(), Some(1))
        .await
        .unwrap_err();
    assert!(matches!(err, SeedError::SubjectNotFound(99)));
}

#[tokio::test]
async fn test_unknown_subject_does_not_stop_others() {
    let (store, orchestrator) = seeded_store().await;

    let outcomes = orchestrator
        .generate_all(&[MILK, 99, BUTTER], first_week(), Some(1))
        .await;

    assert!(outcomes[0].1.is_ok());
    assert!(matches!(outcomes[1].1, Err(SeedError::SubjectNotFound(99))));
    assert!(outcomes[2].1.is_ok());
    assert_eq!(store.count(BUTTER, RecordKind::Measurement).await, 8 * 6 + 2 + 3);
}

#[tokio::test]
async fn test_invalid_range_fails_before_any_store_call() {
    let store = Arc::new(ObservedStore::with_default_pets().await);
    let orchestrator = GenerationOrchestrator::new(store.clone(), store.clone());

    let err = orchestrator
        .generate(MILK, date(2024, 6, 8), date(2024, 6, 1), Some(1))
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::InvalidRange(_)));
    assert_eq!(store.registry_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.sink_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_single_day_range() {
    let (store, orchestrator) = seeded_store().await;

    let summary = orchestrator
        .generate(MILK, date(2024, 6, 1), date(2024, 6, 1), Some(1))
        .await
        .unwrap();

    // offset 0 is due for every cadence
    assert_eq!(summary.days(), 1);
    for metric in MetricKind::ALL {
        assert_eq!(summary.count(metric), 1, "{metric}");
    }
    assert_eq!(store.measurements(MILK).await.len(), MetricKind::ALL.len());
}

#[tokio::test]
async fn test_sink_failure_propagates() {
    let store = Arc::new(ObservedStore {
        fail_after: Some(10),
        ..ObservedStore::with_default_pets().await
    });
    let orchestrator = GenerationOrchestrator::new(store.clone(), store.clone());

    let err = orchestrator
        .generate_range(MILK, first_week(), Some(1))
        .await
        .unwrap_err();

    match err {
        SeedError::Store(StoreError::Io(e)) => assert_eq!(e.to_string(), "disk full"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_cancel_mid_run_then_rerun() {
    let token = CancellationToken::new();
    let store = Arc::new(ObservedStore {
        // two clears, then cancel during the third day
        cancel_after: Some((2 + 6 * 2 + 3, token.clone())),
        ..ObservedStore::with_default_pets().await
    });
    let orchestrator = GenerationOrchestrator::new(store.clone(), store.clone())
        .with_cancellation(token);

    let err = orchestrator
        .generate_range(MILK, first_week(), Some(1))
        .await
        .unwrap_err();
    let SeedError::Cancelled {
        subject_id,
        days_completed,
    } = err
    else {
        panic!("expected cancellation, got {err}");
    };
    assert_eq!(subject_id, MILK);
    assert_eq!(days_completed, 3);
    assert_eq!(store.inner.vaccinations(MILK).await.len(), 0);

    // a fresh orchestrator over the same store restores a full set
    let orchestrator = GenerationOrchestrator::new(store.clone(), store.clone());
    let summary = orchestrator
        .generate_range(MILK, first_week(), Some(1))
        .await
        .unwrap();

    assert!(summary.cleared_measurements > 0);
    assert_eq!(
        store.inner.count(MILK, RecordKind::Measurement).await as u64,
        summary.total_measurements()
    );
    assert_eq!(store.inner.vaccinations(MILK).await.len(), 4);
}
