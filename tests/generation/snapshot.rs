//! Persisted shape of generated records.

use crate::support::*;
use petcare_seed::GenerationOrchestrator;
use seed_core::{Owner, SeedConfig};
use seed_store::FileStore;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_snapshot_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("petcare-seed.json");
    let config = SeedConfig::default();

    let store = Arc::new(FileStore::open(&path, config.owners.iter().map(Owner::from)).unwrap());
    let orchestrator = GenerationOrchestrator::new(store.clone(), store.clone());
    orchestrator.register(1, &config.subjects).await.unwrap();
    orchestrator
        .generate_range(MILK, first_week(), Some(42))
        .await
        .unwrap();
    store.persist().await.unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let rows = json["health_statuses"].as_object().unwrap();
    assert_eq!(rows.len(), 8 * 6 + 2 + 3);

    for row in rows.values() {
        let name = row["attribute_name"].as_str().unwrap();
        match name {
            "Mood" | "Coat Condition" => {
                assert!(row.get("value").is_none());
                assert!(row.get("unit").is_none());
                assert!(row["label"].is_string());
            }
            _ => {
                assert!(row["value"].is_number());
                assert!(row.get("label").is_none());
                let unit = row["unit"].as_str().unwrap();
                let expected = match name {
                    "Weight" => "kg",
                    "Length" => "cm",
                    "Water Intake" => "ml",
                    "Activity Level" => "minutes",
                    _ => "times",
                };
                assert_eq!(unit, expected, "{name}");
            }
        }
    }

    let vaccinations = json["vaccinations"].as_object().unwrap();
    assert_eq!(vaccinations.len(), 4);

    // reopening reads the same records back
    let reopened = FileStore::open(&path, std::iter::empty()).unwrap();
    let metrics = |records: Vec<seed_core::MeasurementRecord>| {
        records
            .iter()
            .map(|r| (r.metric(), r.label(), r.measured_at()))
            .collect::<Vec<_>>()
    };
    assert_eq!(
        metrics(reopened.memory().measurements(MILK).await),
        metrics(store.memory().measurements(MILK).await)
    );
}
