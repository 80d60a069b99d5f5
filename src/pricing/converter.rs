//! ETH to USD conversion seam

use rust_decimal::Decimal;
use std::sync::{Arc, RwLock};

/// Trait for ETH to USD conversion
///
/// Conversion is synchronous and infallible: implementations return a
/// best-effort value when no fresh rate is available.
pub trait RateConverter: Send + Sync {
    /// Convert an ETH amount to USD
    fn eth_to_usd(&self, eth: Decimal) -> Decimal;
}

/// Converter with a constant rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRate {
    usd_per_eth: Decimal,
}

impl FixedRate {
    /// Create a converter for the given USD price of one ETH
    pub fn new(usd_per_eth: Decimal) -> Self {
        Self { usd_per_eth }
    }

    /// USD price of one ETH
    pub fn usd_per_eth(&self) -> Decimal {
        self.usd_per_eth
    }
}

impl RateConverter for FixedRate {
    fn eth_to_usd(&self, eth: Decimal) -> Decimal {
        eth.saturating_mul(self.usd_per_eth)
    }
}

/// Converter whose rate is pushed by a market data task
///
/// Cards read the rate at derive time; a rate change alone does not trigger
/// recomputation.
#[derive(Debug, Clone, Default)]
pub struct SharedRate {
    usd_per_eth: Arc<RwLock<Decimal>>,
}

impl SharedRate {
    /// Create a shared converter seeded with an initial rate
    pub fn new(usd_per_eth: Decimal) -> Self {
        Self {
            usd_per_eth: Arc::new(RwLock::new(usd_per_eth)),
        }
    }

    /// Publish a new rate
    pub fn set(&self, usd_per_eth: Decimal) {
        let mut guard = self
            .usd_per_eth
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = usd_per_eth;
    }

    /// Current rate
    pub fn get(&self) -> Decimal {
        *self
            .usd_per_eth
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RateConverter for SharedRate {
    fn eth_to_usd(&self, eth: Decimal) -> Decimal {
        eth.saturating_mul(self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fixed_rate() {
        let rate = FixedRate::new(dec!(3000));
        assert_eq!(rate.eth_to_usd(dec!(0.5)), dec!(1500));
        assert_eq!(rate.usd_per_eth(), dec!(3000));
    }

    #[test]
    fn test_shared_rate_updates() {
        let rate = SharedRate::new(dec!(2000));
        let reader = rate.clone();
        assert_eq!(reader.eth_to_usd(dec!(1)), dec!(2000));

        rate.set(dec!(2500));
        assert_eq!(reader.eth_to_usd(dec!(2)), dec!(5000));
    }
}
