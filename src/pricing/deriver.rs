//! Price and inventory derivation
//!
//! Turns a snapshot plus its event history into display prices and stock
//! counters. Everything here is recomputed wholesale from inputs; there is
//! no carried state between calls.

use super::RateConverter;
use crate::collectable::CollectableSnapshot;
use crate::events::{sort_by_created_at, SaleEvent};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Decimal places kept on the next bid price
const NEXT_BID_DP: u32 = 7;
/// Decimal places kept on fixed sale prices
const PRICE_DP: u32 = 3;
/// Decimal places kept on USD amounts
const USD_DP: u32 = 2;

/// Prices and inventory derived from a snapshot and its events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingState {
    /// Current price in ETH
    pub price: Decimal,
    /// Minimum next bid in ETH (auctions only)
    pub next_bid_price: Decimal,
    /// Current price in USD
    pub price_usd: Decimal,
    /// Total USD sold (fixed sales only)
    pub price_usd_sold: Decimal,
    /// Units left in stock (limited fixed sales only)
    pub items_remaining: i64,
    /// Total units offered (limited fixed sales only)
    pub items_of_total: i64,
    /// Remaining stock as a fraction of total, in [0, 1]
    pub progress_ratio: Decimal,
}

/// Derives pricing state for collectables
#[derive(Debug, Clone)]
pub struct StateDeriver {
    /// Multiplier applied to the current bid to get the next bid
    bid_increment: Decimal,
}

impl Default for StateDeriver {
    fn default() -> Self {
        Self {
            bid_increment: dec!(1.10),
        }
    }
}

impl StateDeriver {
    /// Create a deriver with a custom bid increment
    pub fn new(bid_increment: Decimal) -> Self {
        Self { bid_increment }
    }

    /// Bid increment multiplier
    pub fn bid_increment(&self) -> Decimal {
        self.bid_increment
    }

    /// Derive pricing state
    ///
    /// `supply` is the remaining stock reported by the chain listener; when
    /// present and non-zero it replaces the count computed from events.
    pub fn derive(
        &self,
        snapshot: &CollectableSnapshot,
        events: &[SaleEvent],
        supply: Option<u64>,
        converter: &dyn RateConverter,
    ) -> PricingState {
        let mut sorted = events.to_vec();
        sort_by_created_at(&mut sorted);

        if snapshot.is_auction() {
            self.derive_auction(snapshot, &sorted, converter)
        } else {
            self.derive_fixed_sale(snapshot, &sorted, supply, converter)
        }
    }

    fn derive_auction(
        &self,
        snapshot: &CollectableSnapshot,
        events: &[SaleEvent],
        converter: &dyn RateConverter,
    ) -> PricingState {
        let (price, next_bid_price, price_usd) = match events.last() {
            None => {
                let price = snapshot.start_bid.unwrap_or(Decimal::ZERO);
                let next_bid = match snapshot.start_bid {
                    Some(start_bid) if start_bid == price => price,
                    _ => price.saturating_mul(self.bid_increment),
                };
                let usd = non_zero(snapshot.base_value_in_usd)
                    .unwrap_or_else(|| converter.eth_to_usd(price));
                (price, next_bid, usd)
            }
            Some(latest) => {
                let price = latest.value.unwrap_or(Decimal::ZERO);
                let next_bid = price.saturating_mul(self.bid_increment);
                let usd = non_zero(latest.value_in_usd)
                    .unwrap_or_else(|| converter.eth_to_usd(price));
                (price, next_bid, usd)
            }
        };

        PricingState {
            price,
            next_bid_price: round_to(next_bid_price, NEXT_BID_DP),
            price_usd: round_to(price_usd, USD_DP),
            ..Default::default()
        }
    }

    fn derive_fixed_sale(
        &self,
        snapshot: &CollectableSnapshot,
        events: &[SaleEvent],
        supply: Option<u64>,
        converter: &dyn RateConverter,
    ) -> PricingState {
        let mut state = PricingState {
            price: round_to(snapshot.base_price.unwrap_or(Decimal::ZERO), PRICE_DP),
            price_usd: round_to(
                non_zero(snapshot.base_value_in_usd).unwrap_or(Decimal::ZERO),
                USD_DP,
            ),
            ..Default::default()
        };

        if !snapshot.is_open_edition {
            state.items_of_total = to_i64(snapshot.available_quantity.unwrap_or(0));
            state.items_remaining = match supply.filter(|s| *s > 0) {
                Some(remaining) => to_i64(remaining),
                None => {
                    let sold: u64 = events
                        .iter()
                        .fold(0u64, |carry, e| carry.saturating_add(e.units()));
                    state.items_of_total.saturating_sub(to_i64(sold))
                }
            };
        }

        let usd_per_unit = converter.eth_to_usd(state.price);
        let sold_usd = events.iter().fold(Decimal::ZERO, |carry, e| {
            carry.saturating_add(sold_value(e, usd_per_unit))
        });
        state.price_usd_sold = round_to(sold_usd, USD_DP);

        if !snapshot.is_open_edition {
            state.progress_ratio = progress_ratio(state.items_remaining, state.items_of_total);
        }

        state
    }
}

/// Value an event contributes to the sold total
///
/// Priority: USD value, ETH value, explicit amount at the unit price, decoded
/// raw amount at the unit price. The ETH value fallback sums a different unit
/// than the other branches; this is the long-standing marketplace behaviour.
fn sold_value(event: &SaleEvent, usd_per_unit: Decimal) -> Decimal {
    if let Some(usd) = non_zero(event.value_in_usd) {
        return usd;
    }
    if let Some(value) = non_zero(event.value) {
        return value;
    }
    event
        .explicit_amount()
        .or_else(|| event.raw_amount())
        .map(|units| Decimal::from(units).saturating_mul(usd_per_unit))
        .unwrap_or(Decimal::ZERO)
}

fn progress_ratio(remaining: i64, total: i64) -> Decimal {
    if remaining <= 0 || total <= 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(remaining) / Decimal::from(total)).min(Decimal::ONE)
}

fn non_zero(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Round half away from zero to `dp` places
pub fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
