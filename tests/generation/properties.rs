//! Counts, bounds and pairing of generated records.

use crate::support::*;
use chrono::Days;
use seed_core::{MetricKind, SeedConfig, SubjectConfig, VaccinationStatus};

#[tokio::test]
async fn test_first_week_scenario() {
    let (store, orchestrator) = seeded_store().await;

    let summary = orchestrator
        .generate_range(MILK, first_week(), Some(42))
        .await
        .unwrap();

    assert_eq!(summary.subject.base_weight, 2.6);
    assert_eq!(summary.count(MetricKind::Weight), 8);
    assert_eq!(summary.count(MetricKind::Length), 2);
    assert_eq!(summary.count(MetricKind::CoatCondition), 3);
    assert_eq!(summary.total_measurements(), 8 * 6 + 2 + 3);

    let records = store.measurements(MILK).await;
    assert_eq!(records.len() as u64, summary.total_measurements());

    for record in &records {
        if record.metric() == MetricKind::Weight {
            let value = record.value().unwrap();
            assert!(
                2.6 * 0.9 <= value && value <= 2.6 * 1.1,
                "weight {value} out of range"
            );
        }
    }

    let length_days: Vec<_> = records
        .iter()
        .filter(|r| r.metric() == MetricKind::Length)
        .map(|r| r.measured_at().date_naive())
        .collect();
    assert_eq!(length_days, vec![date(2024, 6, 1), date(2024, 6, 8)]);

    let coat_days: Vec<_> = records
        .iter()
        .filter(|r| r.metric() == MetricKind::CoatCondition)
        .map(|r| r.measured_at().date_naive())
        .collect();
    assert_eq!(
        coat_days,
        vec![date(2024, 6, 1), date(2024, 6, 4), date(2024, 6, 7)]
    );
}

#[tokio::test]
async fn test_default_window_counts_and_bounds() {
    let (store, orchestrator) = seeded_store().await;
    let config = SeedConfig::default();
    let range = config.range().unwrap();
    assert_eq!(range.days(), 393);

    for id in [MILK, BUTTER] {
        let summary = orchestrator.generate_range(id, range, Some(7)).await.unwrap();
        let subject = &summary.subject;
        let records = store.measurements(id).await;

        assert_eq!(count_metric(&records, MetricKind::Weight), 393);
        assert_eq!(count_metric(&records, MetricKind::Mood), 393);
        assert_eq!(count_metric(&records, MetricKind::WaterIntake), 393);
        // offsets 0, 7, ..., 392
        assert_eq!(count_metric(&records, MetricKind::Length), 57);
        // offsets 0, 3, ..., 390
        assert_eq!(count_metric(&records, MetricKind::CoatCondition), 131);

        let (w_lo, w_hi) = (subject.base_weight * 0.9, subject.base_weight * 1.1);
        let (l_lo, l_hi) = (subject.base_length() - 3.0, subject.base_length() + 5.0);

        for record in &records {
            let day = record.measured_at().date_naive();
            assert!(range.contains(day), "{} outside range", day);

            match record.metric() {
                MetricKind::Weight => {
                    let v = record.value().unwrap();
                    assert!(w_lo <= v && v <= w_hi, "weight {v}");
                }
                MetricKind::Length => {
                    let v = record.value().unwrap();
                    assert!(l_lo <= v && v <= l_hi, "length {v}");
                }
                MetricKind::Mood | MetricKind::CoatCondition => {
                    assert!(record.value().is_none());
                    assert!(record.unit().is_none());
                    assert!(record.label().is_some());
                }
                _ => {
                    assert!(record.label().is_none());
                    assert_eq!(record.unit(), record.metric().unit());
                }
            }
        }

        let final_weight = summary.final_weight.unwrap();
        assert!(w_lo <= final_weight && final_weight <= w_hi);
    }
}

#[tokio::test]
async fn test_default_window_has_only_completed_doses() {
    let (store, orchestrator) = seeded_store().await;
    let range = SeedConfig::default().range().unwrap();

    let summary = orchestrator.generate_range(BUTTER, range, Some(1)).await.unwrap();
    assert_eq!(summary.completed_vaccinations, 4);
    assert_eq!(summary.pending_vaccinations, 0);

    for record in store.vaccinations(BUTTER).await {
        assert_eq!(record.status(), VaccinationStatus::Completed);
        let given = record.vaccinated_at().unwrap();
        assert_eq!(record.schedule_at(), given);
        let offset = (given - range.start()).num_days();
        assert!((30..=180).contains(&offset));
    }
}

#[tokio::test]
async fn test_booster_iff_within_range() {
    let (store, orchestrator) = seeded_store().await;

    for (seed, end) in [(1, date(2025, 7, 15)), (2, date(2025, 10, 1)), (3, date(2026, 6, 1))] {
        let range = range(date(2024, 6, 1), end);
        orchestrator.generate_range(MILK, range, Some(seed)).await.unwrap();

        let records = store.vaccinations(MILK).await;
        for done in completed(&records) {
            let given = done.vaccinated_at().unwrap();
            let due = given + Days::new(365);
            let booster = records.iter().find(|r| {
                r.status() == VaccinationStatus::Pending && r.name().starts_with(done.name())
            });

            match booster {
                Some(booster) => {
                    assert!(due <= range.end());
                    assert_eq!(booster.schedule_at(), due);
                    assert_eq!(booster.vaccinated_at(), None);
                }
                None => assert!(due > range.end()),
            }
        }
    }
}

#[tokio::test]
async fn test_measurements_carry_local_offset() {
    let (store, orchestrator) = seeded_store().await;
    let orchestrator = orchestrator.with_timezone(chrono_tz::Europe::London);

    orchestrator
        .generate_range(MILK, first_week(), Some(42))
        .await
        .unwrap();

    for record in store.measurements(MILK).await {
        // British Summer Time
        assert_eq!(record.measured_at().offset().local_minus_utc(), 3600);
    }
}

#[tokio::test]
async fn test_bounds_hold_for_uneven_baselines() {
    let (store, orchestrator) = seeded_store().await;
    let template = SeedConfig::default().subjects[0].clone();
    let subjects: Vec<SubjectConfig> = [(10, 4.15), (11, 2.55), (12, 3.35)]
        .into_iter()
        .map(|(id, base_weight)| SubjectConfig {
            id,
            base_weight,
            microchip: format!("CAT0000{id}"),
            ..template.clone()
        })
        .collect();
    orchestrator.register(1, &subjects).await.unwrap();
    let range = SeedConfig::default().range().unwrap();

    for subject in &subjects {
        for seed in 0..3 {
            let summary = orchestrator
                .generate_range(subject.id, range, Some(seed))
                .await
                .unwrap();
            let base = subject.base_weight;
            let base_length = summary.subject.base_length();

            for record in store.measurements(subject.id).await {
                let Some(v) = record.value() else { continue };
                match record.metric() {
                    MetricKind::Weight => assert!(
                        base * 0.9 <= v && v <= base * 1.1,
                        "base={base} seed={seed} weight={v}"
                    ),
                    MetricKind::Length => assert!(
                        base_length - 3.0 <= v && v <= base_length + 5.0,
                        "base={base} seed={seed} length={v}"
                    ),
                    _ => {}
                }
            }
        }
    }
}
