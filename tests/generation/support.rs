//! Shared fixtures.

use chrono::NaiveDate;
use petcare_seed::GenerationOrchestrator;
use seed_core::{DateRange, MetricKind, Owner, SeedConfig, VaccinationRecord};
use seed_store::MemoryStore;
use std::sync::Arc;

pub const MILK: u64 = 3;
pub const BUTTER: u64 = 2;

pub type MemoryOrchestrator = GenerationOrchestrator<MemoryStore, MemoryStore>;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange::new(start, end).unwrap()
}

/// The first eight days of the default window.
pub fn first_week() -> DateRange {
    range(date(2024, 6, 1), date(2024, 6, 8))
}

/// Memory store with the default owner and both default pets registered.
pub async fn seeded_store() -> (Arc<MemoryStore>, MemoryOrchestrator) {
    let config = SeedConfig::default();
    let store = Arc::new(MemoryStore::with_owners(
        config.owners.iter().map(Owner::from),
    ));
    let orchestrator = GenerationOrchestrator::new(store.clone(), store.clone());
    orchestrator.register(1, &config.subjects).await.unwrap();
    (store, orchestrator)
}

/// One line per stored measurement: metric, value, label and timestamp.
pub async fn readings(store: &MemoryStore, subject: u64) -> Vec<String> {
    store
        .measurements(subject)
        .await
        .iter()
        .map(|r| {
            format!(
                "{}|{:?}|{:?}|{}",
                r.metric(),
                r.value(),
                r.label().map(|l| l.as_str()),
                r.measured_at().to_rfc3339()
            )
        })
        .collect()
}

pub fn count_metric(records: &[seed_core::MeasurementRecord], metric: MetricKind) -> usize {
    records.iter().filter(|r| r.metric() == metric).count()
}

pub fn completed(records: &[VaccinationRecord]) -> Vec<&VaccinationRecord> {
    records
        .iter()
        .filter(|r| r.vaccinated_at().is_some())
        .collect()
}
