//! Lifecycle classification
//!
//! Guards are evaluated in a fixed order and the first match wins. Several
//! guards can hold at once (a closed sale that has not started yet, a sold
//! out sale past its end), so the order is part of the contract.

use super::LifecycleStatus;
use crate::collectable::timestamp::is_epoch_zero;
use crate::collectable::CollectableSnapshot;
use chrono::{DateTime, Utc};

/// Inputs to lifecycle classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifecycleInputs {
    pub now: DateTime<Utc>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_closed: bool,
    pub is_reserve_price_auction: bool,
    pub is_auction: bool,
    pub items_remaining: i64,
    pub is_open_edition: bool,
}

impl LifecycleInputs {
    /// Collect classifier inputs from a snapshot and the derived stock count
    pub fn from_snapshot(
        snapshot: &CollectableSnapshot,
        items_remaining: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            now,
            starts_at: snapshot.starts_at,
            ends_at: snapshot.ends_at,
            is_closed: snapshot.is_closed,
            is_reserve_price_auction: snapshot.is_reserve_price_auction,
            is_auction: snapshot.is_auction(),
            items_remaining,
            is_open_edition: snapshot.is_open_edition,
        }
    }
}

/// Classify the lifecycle status of a collectable
///
/// An end time of the Unix epoch means "no end scheduled" and is treated the
/// same as a missing end. A sale with no known start is never in progress.
pub fn classify(inputs: &LifecycleInputs) -> LifecycleStatus {
    let now = inputs.now;
    let end = inputs.ends_at.filter(|e| !is_epoch_zero(e));

    if end.is_none() && inputs.is_reserve_price_auction {
        return LifecycleStatus::AwaitingReserve;
    }

    if inputs.is_closed {
        return LifecycleStatus::Closed;
    }

    if inputs.starts_at.is_some_and(|start| now < start) {
        return LifecycleStatus::Waiting;
    }

    if end.is_some_and(|end| now > end) {
        return LifecycleStatus::Done;
    }

    if !inputs.is_auction && !inputs.is_open_edition && inputs.items_remaining == 0 {
        return LifecycleStatus::OutOfStock;
    }

    let started = inputs.starts_at.is_some_and(|start| now >= start);
    if started && end.is_some_and(|end| now < end) {
        return LifecycleStatus::InProgress;
    }

    LifecycleStatus::Waiting
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn epoch() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(0).unwrap()
    }

    fn live_sale() -> LifecycleInputs {
        LifecycleInputs {
            now: now(),
            starts_at: Some(now() - Duration::hours(1)),
            ends_at: Some(now() + Duration::hours(1)),
            is_closed: false,
            is_reserve_price_auction: false,
            is_auction: false,
            items_remaining: 5,
            is_open_edition: false,
        }
    }

    #[test]
    fn test_in_progress() {
        assert_eq!(classify(&live_sale()), LifecycleStatus::InProgress);
    }

    #[test]
    fn test_reserve_without_end() {
        let inputs = LifecycleInputs {
            ends_at: None,
            is_reserve_price_auction: true,
            is_auction: true,
            is_closed: true,
            ..live_sale()
        };
        assert_eq!(classify(&inputs), LifecycleStatus::AwaitingReserve);
    }

    #[test]
    fn test_reserve_with_epoch_end() {
        let inputs = LifecycleInputs {
            ends_at: Some(epoch()),
            is_reserve_price_auction: true,
            is_auction: true,
            ..live_sale()
        };
        assert_eq!(classify(&inputs), LifecycleStatus::AwaitingReserve);
    }

    #[test]
    fn test_closed_beats_waiting() {
        let inputs = LifecycleInputs {
            starts_at: Some(now() + Duration::hours(2)),
            is_closed: true,
            ..live_sale()
        };
        assert_eq!(classify(&inputs), LifecycleStatus::Closed);
    }

    #[test]
    fn test_waiting_before_start() {
        let inputs = LifecycleInputs {
            starts_at: Some(now() + Duration::minutes(1)),
            items_remaining: 0,
            ..live_sale()
        };
        assert_eq!(classify(&inputs), LifecycleStatus::Waiting);
    }

    #[test]
    fn test_done_beats_out_of_stock() {
        let inputs = LifecycleInputs {
            ends_at: Some(now() - Duration::minutes(1)),
            items_remaining: 0,
            ..live_sale()
        };
        assert_eq!(classify(&inputs), LifecycleStatus::Done);
    }

    #[test]
    fn test_epoch_end_never_done() {
        let inputs = LifecycleInputs {
            ends_at: Some(epoch()),
            ..live_sale()
        };
        // Not done, not in a window: falls through to waiting
        assert_eq!(classify(&inputs), LifecycleStatus::Waiting);
    }

    #[test]
    fn test_out_of_stock() {
        let inputs = LifecycleInputs {
            items_remaining: 0,
            ..live_sale()
        };
        assert_eq!(classify(&inputs), LifecycleStatus::OutOfStock);
    }

    #[test]
    fn test_out_of_stock_ignored_for_auction_and_open_edition() {
        let auction = LifecycleInputs {
            items_remaining: 0,
            is_auction: true,
            ..live_sale()
        };
        assert_eq!(classify(&auction), LifecycleStatus::InProgress);

        let open = LifecycleInputs {
            items_remaining: 0,
            is_open_edition: true,
            ..live_sale()
        };
        assert_eq!(classify(&open), LifecycleStatus::InProgress);
    }

    #[test]
    fn test_no_end_defaults_to_waiting() {
        let inputs = LifecycleInputs {
            ends_at: None,
            ..live_sale()
        };
        assert_eq!(classify(&inputs), LifecycleStatus::Waiting);
    }

    #[test]
    fn test_no_start_waits() {
        let inputs = LifecycleInputs {
            starts_at: None,
            ..live_sale()
        };
        assert_eq!(classify(&inputs), LifecycleStatus::Waiting);
    }

    #[test]
    fn test_exact_end_is_not_done() {
        let inputs = LifecycleInputs {
            ends_at: Some(now()),
            ..live_sale()
        };
        // now == end: not past the end, not before it either
        assert_eq!(classify(&inputs), LifecycleStatus::Waiting);
    }
}
