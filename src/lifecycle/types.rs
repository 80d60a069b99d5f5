//! Lifecycle status types

use serde::{Deserialize, Serialize};

/// Discrete sale lifecycle status of a collectable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleStatus {
    /// Sale has not started
    #[default]
    Waiting,
    /// Sale is open
    InProgress,
    /// Reserve auction waiting for a qualifying bid
    AwaitingReserve,
    /// Limited sale with no stock left
    OutOfStock,
    /// Closed by the operator
    Closed,
    /// Sale window has ended
    Done,
}

impl LifecycleStatus {
    /// Display label for the card badge
    ///
    /// Auctions never show "sold out"; an out-of-stock status on an auction
    /// renders as live.
    pub fn label(&self, is_auction: bool) -> &'static str {
        match self {
            LifecycleStatus::Closed => "closed",
            LifecycleStatus::Done => "ended",
            LifecycleStatus::AwaitingReserve => "awaiting-reserve-bid",
            LifecycleStatus::Waiting => "coming soon",
            LifecycleStatus::OutOfStock if !is_auction => "sold out",
            _ => "live",
        }
    }

    /// Whether the collectable can still be bought or bid on, now or later
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            LifecycleStatus::Waiting | LifecycleStatus::InProgress | LifecycleStatus::AwaitingReserve
        )
    }
}
