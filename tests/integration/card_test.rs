//! Integration tests for the card controller

use chrono::{DateTime, Duration, TimeZone, Utc};
use collectable_state::activation::{ActivationDecision, EventSource};
use collectable_state::card::{ChainUpdate, CollectableCard};
use collectable_state::collectable::CollectableSnapshot;
use collectable_state::events::{merge, SaleEvent};
use collectable_state::lifecycle::LifecycleStatus;
use collectable_state::pricing::SharedRate;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Event source that ignores activation requests
pub struct NullSource;

impl EventSource for NullSource {
    fn initialize(&self, _snapshot: &CollectableSnapshot) {}
}

#[derive(Default)]
struct CountingSource {
    calls: AtomicUsize,
}

impl EventSource for CountingSource {
    fn initialize(&self, _snapshot: &CollectableSnapshot) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

const LIMITED_SALE: &str = r#"{
    "type": "nft",
    "purchase_type": "fixed_sale",
    "title": "Harbour Lights",
    "price": 0.08,
    "value_in_usd": 160,
    "available_qty": 10,
    "starts_at": "2024-03-01T11:00:00Z",
    "ends_at": "2024-03-02T11:00:00Z",
    "contract_address": "0x1234",
    "media": [
        {"url": "https://cdn.example/2.png", "position": 2},
        {"url": "https://cdn.example/1.png", "position": 1}
    ],
    "events": [
        {"id": "a", "created_at": "2024-03-01T11:30:00Z", "amount": 2},
        {"id": "b", "created_at": "2024-03-01T11:10:00Z", "raw": "{\"amount\": \"1\"}"}
    ]
}"#;

#[tokio::test(start_paused = true)]
async fn test_sale_lifecycle_through_chain_ticks() {
    let source = Arc::new(CountingSource::default());
    let rate = SharedRate::new(dec!(2000));
    let mut card = CollectableCard::new(Arc::new(rate.clone()), source.clone());

    let snapshot = CollectableSnapshot::from_json(LIMITED_SALE).unwrap();
    let decision = card.set_collectable(snapshot, now());

    assert_eq!(decision, ActivationDecision::Activate);
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert_eq!(card.state().pricing.items_remaining, 7);
    assert_eq!(card.state().pricing.price_usd_sold, dec!(480));
    assert_eq!(card.view().first_media, "https://cdn.example/1.png");

    // New purchases arrive from the chain, including a duplicate of "a"
    let incoming = vec![
        SaleEvent::at(now() + Duration::minutes(1)).with_id("c").with_amount(7),
        SaleEvent::at(now() - Duration::minutes(30)).with_id("a").with_amount(2),
    ];
    let merged = merge(card.events(), &incoming);
    card.update_from_blockchain(ChainUpdate::with_events(merged), now() + Duration::minutes(2));

    assert_eq!(card.events().len(), 3);
    assert_eq!(card.state().pricing.items_remaining, 0);
    assert_eq!(card.state().lifecycle_status, LifecycleStatus::OutOfStock);

    let view = card.view();
    assert_eq!(view.live_status, "sold out");
    assert!(view.is_sold_out);
    assert!(!view.is_active);
    assert!(view.is_nft);

    // Rate changes are picked up on the next recomputation
    rate.set(dec!(3000));
    card.refresh_status(now() + Duration::minutes(3));
    assert_eq!(card.state().pricing.price_usd_sold, dec!(2400));

    card.dispose();
}

#[tokio::test(start_paused = true)]
async fn test_closed_upcoming_sale() {
    let mut snapshot = CollectableSnapshot::from_json(LIMITED_SALE).unwrap();
    snapshot.is_closed = true;
    snapshot.starts_at = Some(now() + Duration::days(1));
    snapshot.ends_at = Some(now() + Duration::days(2));

    let mut card = CollectableCard::new(Arc::new(SharedRate::new(dec!(2000))), Arc::new(NullSource));
    let decision = card.set_collectable(snapshot, now());

    assert_eq!(card.state().lifecycle_status, LifecycleStatus::Closed);
    assert_eq!(card.view().live_status, "closed");
    assert!(matches!(decision, ActivationDecision::ScheduleAt(_)));
    assert!(card.has_pending_activation());

    card.dispose();
    assert!(!card.has_pending_activation());
}

#[tokio::test(start_paused = true)]
async fn test_vrf_drop_activates_after_end() {
    let source = Arc::new(CountingSource::default());
    let mut snapshot = CollectableSnapshot::from_json(LIMITED_SALE).unwrap();
    snapshot.is_vrf_drop = true;
    snapshot.ends_at = Some(now() - Duration::days(3));
    snapshot.starts_at = Some(now() - Duration::days(4));

    let mut card = CollectableCard::new(Arc::new(SharedRate::new(dec!(2000))), source.clone());
    let decision = card.set_collectable(snapshot, now());

    assert_eq!(decision, ActivationDecision::Activate);
    assert_eq!(card.state().lifecycle_status, LifecycleStatus::Done);
    assert_eq!(card.view().live_status, "ended");
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}
