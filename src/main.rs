use clap::Parser;
use collectable_state::cli::{Cli, Commands};
use collectable_state::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    collectable_state::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Derive(args) => {
            tracing::debug!(snapshot = ?args.snapshot, "Deriving card state");
            args.execute(&config).await?;
        }
        Commands::Replay(args) => {
            tracing::debug!(updates = ?args.updates, "Replaying chain updates");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Pricing: rate={} USD/ETH, bid increment={}",
                config.pricing.eth_usd_rate, config.pricing.bid_increment
            );
            println!(
                "  Activation: lead={}m, grace={}h",
                config.activation.lead_time_minutes, config.activation.grace_period_hours
            );
            println!(
                "  Telemetry: level={}, format={:?}",
                config.telemetry.log_level, config.telemetry.log_format
            );
        }
    }

    Ok(())
}
