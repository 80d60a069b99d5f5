//! Replay command implementation

use super::{load_snapshot, resolve_time, LoggingSource};
use crate::card::{ChainUpdate, CollectableCard};
use crate::config::Config;
use crate::events::merge;
use crate::pricing::FixedRate;
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Snapshot JSON file as returned by the marketplace API
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Chain updates, one JSON object per line
    #[arg(long)]
    pub updates: PathBuf,

    /// Evaluation time (RFC 3339 or epoch millis), defaults to now
    #[arg(long)]
    pub at: Option<String>,

    /// USD per ETH, overrides the configured rate
    #[arg(long)]
    pub rate: Option<Decimal>,
}

impl ReplayArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let snapshot = load_snapshot(&self.snapshot)?;
        let now = resolve_time(self.at.as_deref())?;
        let rate = self.rate.unwrap_or(config.pricing.eth_usd_rate);
        let content = std::fs::read_to_string(&self.updates)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", self.updates.display(), e))?;

        let mut card = CollectableCard::with_config(
            config,
            Arc::new(FixedRate::new(rate)),
            Arc::new(LoggingSource),
        );
        let decision = card.set_collectable(snapshot, now);
        tracing::info!(%decision, "Loaded snapshot");

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut update: ChainUpdate = serde_json::from_str(line)
                .map_err(|e| anyhow::anyhow!("Invalid update on line {}: {}", index + 1, e))?;
            // Recorded ticks may only carry new events; fold them into the history
            update.events = merge(card.events(), &update.events);

            card.update_from_blockchain(update, now);
            println!("{}", serde_json::to_string(&card.view())?);
        }

        card.dispose();
        Ok(())
    }
}
