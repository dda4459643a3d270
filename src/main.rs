//! Command-line interface for petcare-seed
//!
//! # Usage Examples
//!
//! ```bash
//! # Seed the built-in pets for user 1 into ./petcare-seed.json
//! petcare-seed
//!
//! # Use another user and store file
//! petcare-seed --user-id 4 --store data/seed.json
//!
//! # Deterministic run for a subset of pets from a config file
//! petcare-seed --config seed.yaml --seed 42 --subjects 3,2
//!
//! # Generate and print the summary without writing the store
//! petcare-seed --dry-run
//! ```
//!
//! Set `RUST_LOG=info` to see per-subject progress.

use anyhow::Context;
use clap::Parser;
use petcare_seed::{GenerationOrchestrator, RunReport};
use seed_core::{Owner, OwnerId, SeedConfig, SubjectId};
use seed_store::FileStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "petcare-seed")]
#[command(about = "Seed a pet health tracker with realistic synthetic data")]
#[command(long_about = None)]
struct Cli {
    /// ID of the user that owns the seeded pets
    #[arg(long, default_value = "1", env = "PETCARE_SEED_USER_ID")]
    user_id: OwnerId,

    /// Path to seed configuration YAML (built-in pets and dates when omitted)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to the JSON store file
    #[arg(long, default_value = "petcare-seed.json", value_name = "PATH")]
    store: PathBuf,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long)]
    seed: Option<u64>,

    /// Pets to generate (comma-separated IDs, empty = all configured pets)
    #[arg(long, value_delimiter = ',')]
    subjects: Vec<SubjectId>,

    /// Dry-run mode: generate and report without writing the store file
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SeedConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {path:?}"))?,
        None => SeedConfig::default(),
    };
    let range = config.range().context("Invalid date range")?;
    let tz = config.tz()?;
    let seed = cli.seed.or(config.seed);

    let store = Arc::new(
        FileStore::open(&cli.store, config.owners.iter().map(Owner::from))
            .with_context(|| format!("Failed to open store {:?}", cli.store))?,
    );

    let token = CancellationToken::new();
    let orchestrator = GenerationOrchestrator::new(store.clone(), store.clone())
        .with_timezone(tz)
        .with_cancellation(token.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, stopping after the current day");
            token.cancel();
        }
    });

    println!(
        "Generating seed data from {} to {}",
        range.start(),
        range.end()
    );

    let registered = orchestrator
        .register(cli.user_id, &config.subjects)
        .await
        .context("Create a user first or specify a different user ID")?;
    for (subject, created) in &registered {
        if *created {
            println!("Created new pet: {} (ID: {})", subject.name, subject.id);
        } else {
            println!("Using existing pet: {} (ID: {})", subject.name, subject.id);
        }
    }

    let selected: Vec<SubjectId> = if cli.subjects.is_empty() {
        registered.iter().map(|(subject, _)| subject.id).collect()
    } else {
        cli.subjects.clone()
    };

    let mut summaries = Vec::with_capacity(selected.len());
    let mut failed = 0usize;
    for (id, outcome) in orchestrator.generate_all(&selected, range, seed).await {
        match outcome {
            Ok(summary) => {
                tracing::info!(
                    "Generated subject {} in {:?} ({:.0} records/s)",
                    id,
                    summary.duration,
                    summary.records_per_second()
                );
                summaries.push(summary);
            }
            Err(e) => {
                eprintln!("Generation for pet {id} failed: {e}");
                failed += 1;
            }
        }
    }

    if cli.dry_run {
        tracing::info!("Dry run: not writing {}", store.path().display());
    } else {
        store
            .persist()
            .await
            .with_context(|| format!("Failed to write store {:?}", cli.store))?;
    }

    println!("{}", RunReport::new(range, &summaries));

    if failed > 0 {
        anyhow::bail!("{failed} of {} pets failed", selected.len());
    }
    Ok(())
}
