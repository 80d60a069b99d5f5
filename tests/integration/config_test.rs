//! End-to-end configuration tests

use collectable_state::card::CollectableCard;
use collectable_state::collectable::CollectableSnapshot;
use collectable_state::config::Config;
use collectable_state::pricing::FixedRate;
use rust_decimal_macros::dec;
use std::sync::Arc;

use crate::card_test::NullSource;

#[test]
fn test_config_drives_card() {
    let toml = r#"
        [pricing]
        eth_usd_rate = 2000
        bid_increment = 1.25

        [activation]
        lead_time_minutes = 5
        grace_period_hours = 1
    "#;
    let config: Config = toml::from_str(toml).unwrap();

    let snapshot = CollectableSnapshot::from_json(
        r#"{
            "purchase_type": "auction",
            "events": [{"created_at": "2024-03-01T12:00:00Z", "value": 4}]
        }"#,
    )
    .unwrap();

    let mut card = CollectableCard::with_config(
        &config,
        Arc::new(FixedRate::new(config.pricing.eth_usd_rate)),
        Arc::new(NullSource),
    );
    card.set_collectable(snapshot, chrono::Utc::now());

    assert_eq!(card.state().pricing.next_bid_price, dec!(5));
    assert_eq!(card.state().pricing.price_usd, dec!(8000));
}
