//! Chain listener updates

use crate::collectable::timestamp;
use crate::events::SaleEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress of a VRF drop's randomness cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VrfStatus {
    #[serde(default)]
    pub requested: bool,
    #[serde(default)]
    pub committed: bool,
    #[serde(default)]
    pub fulfilled: bool,
}

/// One tick from the on-chain event listener
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainUpdate {
    /// Merged, deduplicated event history
    #[serde(default)]
    pub events: Vec<SaleEvent>,
    /// Remaining stock reported by the sale contract
    #[serde(default)]
    pub supply: Option<u64>,
    /// Units bought by the connected wallet
    #[serde(default)]
    pub items_bought: Option<u64>,
    /// Start time reported by the auction contract
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub starts_at: Option<DateTime<Utc>>,
    /// End time reported by the auction contract
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub ends_at: Option<DateTime<Utc>>,
    /// Minimum start time reported by the auction contract
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub minimum_starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub vrf: VrfStatus,
}

impl ChainUpdate {
    /// Create an update carrying only an event list
    pub fn with_events(events: Vec<SaleEvent>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }
}
