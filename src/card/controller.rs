//! Collectable card controller
//!
//! Owns the working snapshot, its event history and the derived state for a
//! single card. Every input change (a new snapshot, a chain tick, a clock
//! tick) triggers a full recomputation; activation of the chain listener is
//! evaluated only when a snapshot is loaded.

use super::state::{derive_state, DerivedState};
use super::{CardView, ChainUpdate, VrfStatus};
use crate::activation::{
    ActivationDecision, ActivationInputs, ActivationScheduler, ActivationWindow, EventSource,
};
use crate::collectable::CollectableSnapshot;
use crate::config::Config;
use crate::events::{sort_by_created_at, SaleEvent};
use crate::lifecycle::LifecycleStatus;
use crate::pricing::{RateConverter, StateDeriver};
use crate::telemetry::{increment, set_gauge, CounterMetric, GaugeMetric};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;

/// View state for one collectable card
pub struct CollectableCard {
    snapshot: CollectableSnapshot,
    events: Vec<SaleEvent>,
    supply: Option<u64>,
    items_bought: Option<u64>,
    vrf: VrfStatus,
    state: DerivedState,
    deriver: StateDeriver,
    window: ActivationWindow,
    converter: Arc<dyn RateConverter>,
    scheduler: ActivationScheduler,
}

impl CollectableCard {
    /// Create an empty card with default pricing and activation settings
    pub fn new(converter: Arc<dyn RateConverter>, source: Arc<dyn EventSource>) -> Self {
        Self::with_parts(
            StateDeriver::default(),
            ActivationWindow::default(),
            converter,
            source,
        )
    }

    /// Create an empty card configured from a config file
    pub fn with_config(
        config: &Config,
        converter: Arc<dyn RateConverter>,
        source: Arc<dyn EventSource>,
    ) -> Self {
        Self::with_parts(
            config.pricing.deriver(),
            config.activation.window(),
            converter,
            source,
        )
    }

    fn with_parts(
        deriver: StateDeriver,
        window: ActivationWindow,
        converter: Arc<dyn RateConverter>,
        source: Arc<dyn EventSource>,
    ) -> Self {
        Self {
            snapshot: CollectableSnapshot::default(),
            events: Vec::new(),
            supply: None,
            items_bought: None,
            vrf: VrfStatus::default(),
            state: DerivedState::default(),
            deriver,
            window,
            converter,
            scheduler: ActivationScheduler::new(source),
        }
    }

    /// Replace the working snapshot
    ///
    /// Recomputes all derived state from the snapshot's embedded events and
    /// re-evaluates listener activation, cancelling any pending activation.
    /// Supply, wallet purchases and VRF progress from earlier chain ticks
    /// are cleared.
    pub fn set_collectable(
        &mut self,
        snapshot: CollectableSnapshot,
        now: DateTime<Utc>,
    ) -> ActivationDecision {
        let mut events = snapshot.events.clone();
        sort_by_created_at(&mut events);

        self.snapshot = snapshot;
        self.events = events;
        // Chain state belongs to the previous collectable's listener
        self.supply = None;
        self.items_bought = None;
        self.vrf = VrfStatus::default();
        self.recompute(now);

        let decision = self.window.evaluate(&self.activation_inputs(now));
        tracing::debug!(title = %self.snapshot.title, %decision, "Evaluated activation");
        self.scheduler.apply(decision, &self.snapshot);

        decision
    }

    /// Apply a tick from the chain listener
    ///
    /// The event list is replaced wholesale. Boundary overrides only apply to
    /// auctions, whose contracts can move the start and extend the end.
    pub fn update_from_blockchain(&mut self, update: ChainUpdate, now: DateTime<Utc>) {
        let ChainUpdate {
            mut events,
            supply,
            items_bought,
            starts_at,
            ends_at,
            minimum_starts_at,
            vrf,
        } = update;

        sort_by_created_at(&mut events);
        self.events = events;
        self.supply = supply;
        self.items_bought = items_bought;
        self.vrf = vrf;

        if self.snapshot.is_auction() {
            if let Some(ends_at) = ends_at {
                self.snapshot.ends_at = Some(ends_at);
            }
            if let Some(starts_at) = starts_at {
                self.snapshot.starts_at = Some(starts_at);
            }
            if let Some(minimum_starts_at) = minimum_starts_at {
                self.snapshot.minimum_starts_at = Some(minimum_starts_at);
            }
        }

        self.recompute(now);
    }

    /// Re-derive state for a new wall-clock time
    ///
    /// Used by countdown ticks; inputs other than time are unchanged.
    pub fn refresh_status(&mut self, now: DateTime<Utc>) -> LifecycleStatus {
        self.recompute(now).lifecycle_status
    }

    /// Recompute all derived state from current inputs
    pub fn recompute(&mut self, now: DateTime<Utc>) -> &DerivedState {
        self.state = derive_state(
            &self.snapshot,
            &self.events,
            self.supply,
            now,
            &self.deriver,
            self.converter.as_ref(),
        );

        increment(CounterMetric::Recomputation);
        set_gauge(
            GaugeMetric::ProgressRatio,
            self.state.pricing.progress_ratio.to_f64().unwrap_or(0.0),
        );
        set_gauge(
            GaugeMetric::ItemsRemaining,
            self.state.pricing.items_remaining as f64,
        );
        tracing::debug!(
            title = %self.snapshot.title,
            status = ?self.state.lifecycle_status,
            price = %self.state.pricing.price,
            items_remaining = self.state.pricing.items_remaining,
            "Recomputed card state"
        );

        &self.state
    }

    fn activation_inputs(&self, now: DateTime<Utc>) -> ActivationInputs {
        ActivationInputs {
            now,
            starts_at: self.snapshot.starts_at,
            ends_at: self.snapshot.ends_at,
            has_contract_address: self.snapshot.has_contract_address(),
            is_sold_out: self.is_sold_out(),
            is_vrf_drop: self.snapshot.is_vrf_drop,
            is_closed: self.snapshot.is_closed,
            is_reserve_price_auction: self.snapshot.is_reserve_price_auction,
        }
    }

    /// Cancel any pending activation; call when the card is torn down
    pub fn dispose(&mut self) {
        if self.scheduler.cancel() {
            tracing::debug!(title = %self.snapshot.title, "Disposed card with pending activation");
        }
    }

    /// Current derived state
    pub fn state(&self) -> &DerivedState {
        &self.state
    }

    /// Working snapshot
    pub fn snapshot(&self) -> &CollectableSnapshot {
        &self.snapshot
    }

    /// Events sorted by creation time
    pub fn events(&self) -> &[SaleEvent] {
        &self.events
    }

    /// Units bought by the connected wallet, as last reported by the chain
    pub fn items_bought(&self) -> Option<u64> {
        self.items_bought
    }

    /// VRF cycle progress, as last reported by the chain
    pub fn vrf_status(&self) -> VrfStatus {
        self.vrf
    }

    /// Whether a limited fixed sale has run out of stock
    pub fn is_sold_out(&self) -> bool {
        self.state.is_sold_out(self.snapshot.is_auction())
    }

    /// Whether an activation is waiting to fire
    pub fn has_pending_activation(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Render-ready view of the card
    pub fn view(&self) -> CardView {
        CardView::from_card(self)
    }
}
