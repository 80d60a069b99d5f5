//! Derive command implementation

use super::{load_snapshot, resolve_time, LoggingSource};
use crate::card::CollectableCard;
use crate::config::Config;
use crate::pricing::FixedRate;
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// Snapshot JSON file as returned by the marketplace API
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Evaluation time (RFC 3339 or epoch millis), defaults to now
    #[arg(long)]
    pub at: Option<String>,

    /// USD per ETH, overrides the configured rate
    #[arg(long)]
    pub rate: Option<Decimal>,
}

impl DeriveArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let snapshot = load_snapshot(&self.snapshot)?;
        let now = resolve_time(self.at.as_deref())?;
        let rate = self.rate.unwrap_or(config.pricing.eth_usd_rate);

        let mut card = CollectableCard::with_config(
            config,
            Arc::new(FixedRate::new(rate)),
            Arc::new(LoggingSource),
        );
        let decision = card.set_collectable(snapshot, now);

        let output = serde_json::json!({
            "evaluated_at": now,
            "activation": decision.to_string(),
            "card": card.view(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);

        card.dispose();
        Ok(())
    }
}
