//! CLI interface for collectable-state
//!
//! Provides subcommands for:
//! - `derive`: Derive card state for a snapshot file
//! - `replay`: Feed recorded chain updates through a card
//! - `config`: Show configuration

mod derive;
mod replay;

pub use derive::DeriveArgs;
pub use replay::ReplayArgs;

use crate::activation::EventSource;
use crate::collectable::{timestamp, CollectableSnapshot};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "collectable-state")]
#[command(about = "Derived pricing, lifecycle and activation state for collectable cards")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive card state for a snapshot
    Derive(DeriveArgs),
    /// Replay chain updates against a snapshot
    Replay(ReplayArgs),
    /// Show configuration
    Config,
}

/// Event source that only logs activation requests
struct LoggingSource;

impl EventSource for LoggingSource {
    fn initialize(&self, snapshot: &CollectableSnapshot) {
        tracing::info!(
            title = %snapshot.title,
            contract = snapshot.contract_address.as_deref().unwrap_or_default(),
            "Event source activation requested"
        );
    }
}

/// Read and parse a snapshot file
fn load_snapshot(path: &Path) -> anyhow::Result<CollectableSnapshot> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    Ok(CollectableSnapshot::from_json(&content)?)
}

/// Resolve the evaluation time, defaulting to now
fn resolve_time(at: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match at {
        Some(s) => timestamp::parse_timestamp(s)
            .ok_or_else(|| anyhow::anyhow!("Invalid timestamp: {}", s)),
        None => Ok(Utc::now()),
    }
}
