//! Per-subject generation runs.
//!
//! A run for one subject is a scoped unit: clear every existing record,
//! then write the day-by-day measurement series followed by the vaccination
//! set. Runs on the same subject are serialized by a per-subject lock; runs
//! on different subjects proceed concurrently.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use futures::future::join_all;
use seed_core::{
    DateRange, InvalidRange, MetricKind, OwnerId, Record, RecordError, RecordKind, Subject,
    SubjectConfig, SubjectId,
};
use seed_generator::{DistributionError, RandomSource, SeriesGenerator, VaccinationScheduler};
use seed_store::{Sink, StoreError, SubjectRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::summary::GenerationSummary;

/// Error type for generation runs.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The subject is not in the registry
    #[error("Subject with ID {0} not found")]
    SubjectNotFound(SubjectId),

    /// The owner is not in the registry
    #[error("User with ID {0} not found")]
    OwnerNotFound(OwnerId),

    /// End date before start date
    #[error(transparent)]
    InvalidRange(#[from] InvalidRange),

    /// The run was cancelled between days
    #[error("Generation for subject {subject_id} cancelled after {days_completed} days")]
    Cancelled {
        subject_id: SubjectId,
        days_completed: u32,
    },

    /// A built-in distribution table is invalid
    #[error("Invalid distribution: {0}")]
    Distribution(#[from] DistributionError),

    /// A generated record is malformed
    #[error("Invalid record: {0}")]
    Record(#[from] RecordError),

    /// Registry or sink failure, passed through unchanged
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Drives generation runs against a registry and a sink.
pub struct GenerationOrchestrator<R, S> {
    registry: Arc<R>,
    sink: Arc<S>,
    tz: Tz,
    vaccinations: VaccinationScheduler,
    cancel: Option<CancellationToken>,
    locks: Mutex<HashMap<SubjectId, Arc<Mutex<()>>>>,
}

impl<R, S> GenerationOrchestrator<R, S>
where
    R: SubjectRegistry,
    S: Sink,
{
    /// Create an orchestrator that stamps measurements in UTC.
    pub fn new(registry: Arc<R>, sink: Arc<S>) -> Self {
        Self {
            registry,
            sink,
            tz: Tz::UTC,
            vaccinations: VaccinationScheduler::default(),
            cancel: None,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Set the local time zone attached to every `measured_at`.
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.tz = tz;
        self
    }

    /// Replace the vaccination scheduler.
    pub fn with_vaccinations(mut self, vaccinations: VaccinationScheduler) -> Self {
        self.vaccinations = vaccinations;
        self
    }

    /// Stop runs between days once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Make sure the owner and every configured subject exist.
    ///
    /// Returns each subject with whether it was created by this call.
    pub async fn register(
        &self,
        owner_id: OwnerId,
        subjects: &[SubjectConfig],
    ) -> Result<Vec<(Subject, bool)>, SeedError> {
        let owner = self
            .registry
            .owner(owner_id)
            .await?
            .ok_or(SeedError::OwnerNotFound(owner_id))?;
        info!("Using user: {} (ID: {})", owner.username, owner.id);

        let mut registered = Vec::with_capacity(subjects.len());
        for config in subjects {
            let (subject, created) = self
                .registry
                .get_or_create(config.id, config.defaults(owner_id))
                .await?;
            if created {
                info!("Created new subject: {} (ID: {})", subject.name, subject.id);
            } else {
                info!("Using existing subject: {} (ID: {})", subject.name, subject.id);
            }
            registered.push((subject, created));
        }
        Ok(registered)
    }

    /// Generate one subject's data between two dates, inclusive.
    ///
    /// The range is checked before any registry or sink call.
    pub async fn generate(
        &self,
        subject_id: SubjectId,
        start: NaiveDate,
        end: NaiveDate,
        seed: Option<u64>,
    ) -> Result<GenerationSummary, SeedError> {
        let range = DateRange::new(start, end)?;
        self.generate_range(subject_id, range, seed).await
    }

    /// Generate one subject's data over a range.
    pub async fn generate_range(
        &self,
        subject_id: SubjectId,
        range: DateRange,
        seed: Option<u64>,
    ) -> Result<GenerationSummary, SeedError> {
        let subject = self
            .registry
            .get(subject_id)
            .await?
            .ok_or(SeedError::SubjectNotFound(subject_id))?;

        let lock = self.subject_lock(subject_id).await;
        let outcome = {
            let _guard = lock.lock().await;
            self.run(subject, range, seed).await
        };
        self.release_lock(subject_id, lock).await;
        outcome
    }

    async fn run(
        &self,
        subject: Subject,
        range: DateRange,
        seed: Option<u64>,
    ) -> Result<GenerationSummary, SeedError> {
        let subject_id = subject.id;
        let started = Instant::now();
        let mut summary = GenerationSummary::new(subject.clone(), range);
        info!(
            "Generating data for {} (ID: {}) from {} to {}",
            subject.name,
            subject.id,
            range.start(),
            range.end()
        );

        for kind in [RecordKind::Measurement, RecordKind::Vaccination] {
            let cleared = self.sink.delete_all(subject_id, kind).await?;
            info!("Cleared {} existing {} records for {}", cleared, kind, subject.name);
            summary.record_cleared(kind, cleared);
        }

        let rng = RandomSource::for_subject(seed, subject_id);
        let mut series = SeriesGenerator::new(&subject, self.tz, rng)?;
        let created_at = Utc::now();

        debug!(
            "Starting weight {:?} kg, length {:?} cm",
            series.trend_baseline(MetricKind::Weight),
            series.trend_baseline(MetricKind::Length)
        );

        for (offset, date) in range.iter() {
            if self.is_cancelled() {
                warn!(
                    "Generation for {} cancelled after {} of {} days",
                    subject.name,
                    offset,
                    range.days()
                );
                return Err(SeedError::Cancelled {
                    subject_id,
                    days_completed: offset,
                });
            }

            for record in series.day(offset, date, created_at)? {
                summary.record_measurement(&record);
                self.sink.create(Record::Measurement(record)).await?;
            }
        }

        summary.final_weight = series.trend_value(MetricKind::Weight);
        summary.final_length = series.trend_value(MetricKind::Length);
        info!(
            "Created {} health records for {} ({} weight, {} length)",
            summary.total_measurements(),
            subject.name,
            summary.count(MetricKind::Weight),
            summary.count(MetricKind::Length)
        );

        let vaccinations = self
            .vaccinations
            .schedule(subject_id, &range, series.rng_mut());
        for record in vaccinations {
            summary.record_vaccination(&record);
            self.sink.create(Record::Vaccination(record)).await?;
        }
        info!(
            "Created {} vaccination records for {}",
            summary.total_vaccinations(),
            subject.name
        );

        summary.duration = started.elapsed();
        Ok(summary)
    }

    /// Generate several subjects concurrently.
    ///
    /// Every subject gets its own outcome; a failing subject does not stop
    /// the others. Outcomes come back in the order of `subject_ids`.
    pub async fn generate_all(
        &self,
        subject_ids: &[SubjectId],
        range: DateRange,
        seed: Option<u64>,
    ) -> Vec<(SubjectId, Result<GenerationSummary, SeedError>)> {
        let runs = subject_ids.iter().map(|&id| async move {
            let outcome = self.generate_range(id, range, seed).await;
            if let Err(e) = &outcome {
                warn!("Generation for subject {} failed: {}", id, e);
            }
            (id, outcome)
        });
        join_all(runs).await
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    async fn subject_lock(&self, subject_id: SubjectId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        Arc::clone(locks.entry(subject_id).or_default())
    }

    /// Drop our handle and forget the lock once no other run holds it.
    async fn release_lock(&self, subject_id: SubjectId, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().await;
        drop(lock);
        if locks
            .get(&subject_id)
            .is_some_and(|held| Arc::strong_count(held) == 1)
        {
            locks.remove(&subject_id);
        }
    }
}
