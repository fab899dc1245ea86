//! Stockbook recompute runner
//!
//! Reads a snapshot of record collections and prints the derived bank
//! statements, open order balances and stock valuation as JSON.

mod snapshot;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use snapshot::{Snapshot, build_report};
use stockbook_shared::AppConfig;

#[derive(Parser)]
#[command(name = "stockbook-recompute", about = "Recompute balances and valuation from a record snapshot")]
struct Args {
    /// Snapshot JSON file. Defaults to `snapshot.path` from the configuration.
    snapshot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing on stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockbook=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let path = args
        .snapshot
        .unwrap_or_else(|| PathBuf::from(&config.snapshot.path));
    info!(path = %path.display(), "reading snapshot");

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;

    let report = build_report(&snapshot, &config.accounting)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
