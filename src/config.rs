//! Configuration types for collectable-state

use crate::activation::ActivationWindow;
use crate::pricing::StateDeriver;
use crate::telemetry::LogFormat;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub activation: ActivationConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Pricing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// USD price of one ETH for the fixed-rate converter
    #[serde(default = "default_eth_usd_rate")]
    pub eth_usd_rate: Decimal,

    /// Multiplier from the current bid to the minimum next bid
    #[serde(default = "default_bid_increment")]
    pub bid_increment: Decimal,
}

fn default_eth_usd_rate() -> Decimal {
    Decimal::ZERO
}
fn default_bid_increment() -> Decimal {
    Decimal::new(110, 2) // 1.10 = +10%
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            eth_usd_rate: default_eth_usd_rate(),
            bid_increment: default_bid_increment(),
        }
    }
}

impl PricingConfig {
    /// Build a deriver from this configuration
    pub fn deriver(&self) -> StateDeriver {
        StateDeriver::new(self.bid_increment)
    }
}

/// Event source activation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ActivationConfig {
    /// Minutes before the sale start that listening opens
    #[serde(default = "default_lead_time_minutes")]
    pub lead_time_minutes: i64,

    /// Hours after the sale end that listening stays open
    #[serde(default = "default_grace_period_hours")]
    pub grace_period_hours: i64,
}

fn default_lead_time_minutes() -> i64 {
    15
}
fn default_grace_period_hours() -> i64 {
    6
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            lead_time_minutes: default_lead_time_minutes(),
            grace_period_hours: default_grace_period_hours(),
        }
    }
}

impl ActivationConfig {
    /// Check that both durations are non-negative and representable
    pub fn validate(&self) -> anyhow::Result<()> {
        self.lead_time()?;
        self.grace_period()?;
        Ok(())
    }

    fn lead_time(&self) -> anyhow::Result<chrono::Duration> {
        chrono::Duration::try_minutes(self.lead_time_minutes)
            .filter(|d| *d >= chrono::Duration::zero())
            .ok_or_else(|| {
                anyhow::anyhow!("Invalid lead_time_minutes: {}", self.lead_time_minutes)
            })
    }

    fn grace_period(&self) -> anyhow::Result<chrono::Duration> {
        chrono::Duration::try_hours(self.grace_period_hours)
            .filter(|d| *d >= chrono::Duration::zero())
            .ok_or_else(|| {
                anyhow::anyhow!("Invalid grace_period_hours: {}", self.grace_period_hours)
            })
    }

    /// Build the listening window from this configuration
    ///
    /// Invalid durations fall back to the defaults; `Config::load` rejects
    /// them up front.
    pub fn window(&self) -> ActivationWindow {
        let defaults = ActivationWindow::default();
        ActivationWindow::new(
            self.lead_time().unwrap_or(defaults.lead_time),
            self.grace_period().unwrap_or(defaults.grace_period),
        )
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.activation.validate()?;
        Ok(config)
    }
}
