//! Derived card state

use crate::collectable::CollectableSnapshot;
use crate::events::SaleEvent;
use crate::lifecycle::{classify, LifecycleInputs, LifecycleStatus};
use crate::pricing::{PricingState, RateConverter, StateDeriver};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything the card derives from its inputs
///
/// A pure function of snapshot, events, external supply, time and the
/// conversion rate; never patched field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedState {
    #[serde(flatten)]
    pub pricing: PricingState,
    pub lifecycle_status: LifecycleStatus,
}

impl DerivedState {
    /// Whether a limited fixed sale has run out of stock
    ///
    /// Auctions are never sold out.
    pub fn is_sold_out(&self, is_auction: bool) -> bool {
        !is_auction && self.lifecycle_status == LifecycleStatus::OutOfStock
    }
}

/// Derive pricing, inventory and lifecycle status in one pass
pub fn derive_state(
    snapshot: &CollectableSnapshot,
    events: &[SaleEvent],
    supply: Option<u64>,
    now: DateTime<Utc>,
    deriver: &StateDeriver,
    converter: &dyn RateConverter,
) -> DerivedState {
    let pricing = deriver.derive(snapshot, events, supply, converter);
    let inputs = LifecycleInputs::from_snapshot(snapshot, pricing.items_remaining, now);
    let lifecycle_status = classify(&inputs);

    DerivedState {
        pricing,
        lifecycle_status,
    }
}
