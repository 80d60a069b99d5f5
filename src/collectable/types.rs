//! Collectable snapshot types
//!
//! Mirrors the marketplace API record for a single collectable. Missing
//! optional fields default rather than failing the load.

use super::timestamp;
use crate::events::SaleEvent;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a collectable is sold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseType {
    /// Fixed price sale, optionally limited by quantity
    #[default]
    #[serde(alias = "FIXED_SALE", alias = "sale")]
    FixedSale,
    /// Bidding auction
    #[serde(alias = "AUCTION")]
    Auction,
}

/// What a collectable delivers to the buyer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectableType {
    /// Digital token only
    #[serde(alias = "NFT")]
    Nft,
    /// Physical item only
    #[serde(alias = "TANGIBLE")]
    Tangible,
    /// Physical item paired with a token
    #[serde(alias = "TANGIBLE_NFT")]
    TangibleNft,
}

/// A media asset attached to a collectable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Asset URL
    pub url: String,
    /// Display order, ascending
    #[serde(default)]
    pub position: i64,
    /// Whether this asset is the card preview
    #[serde(default)]
    pub is_preview: bool,
}

/// Point-in-time record describing a sellable item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectableSnapshot {
    /// Collectable kind
    #[serde(rename = "type", default)]
    pub collectable_type: Option<CollectableType>,
    /// Sale mechanism
    #[serde(default)]
    pub purchase_type: PurchaseType,

    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub artist: Option<serde_json::Value>,
    #[serde(default)]
    pub artist_statement: Option<String>,
    #[serde(default)]
    pub version: Option<serde_json::Value>,
    #[serde(default)]
    pub edition: u64,
    #[serde(default)]
    pub edition_of: u64,
    #[serde(default)]
    pub claim: Option<serde_json::Value>,
    #[serde(default)]
    pub pill_override: Option<String>,
    #[serde(default)]
    pub requires_registration: bool,
    #[serde(default)]
    pub bundle_child_items: Vec<serde_json::Value>,

    /// Unlimited supply sale
    #[serde(default)]
    pub is_open_edition: bool,
    /// Fulfilment gated on a verifiable randomness cycle
    #[serde(default)]
    pub is_vrf_drop: bool,
    /// Auction with no end time until the reserve is met
    #[serde(default)]
    pub is_reserve_price_auction: bool,
    /// Manually closed by the operator
    #[serde(default)]
    pub is_closed: bool,

    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub minimum_starts_at: Option<DateTime<Utc>>,

    /// Total supply for limited fixed sales
    #[serde(default, rename = "available_qty")]
    pub available_quantity: Option<u64>,
    /// Fixed sale price in ETH
    #[serde(default, rename = "price")]
    pub base_price: Option<Decimal>,
    /// USD value quoted by the API
    #[serde(default, rename = "value_in_usd")]
    pub base_value_in_usd: Option<Decimal>,
    /// Opening bid for auctions
    #[serde(default)]
    pub start_bid: Option<Decimal>,

    /// Sale contract, required for on-chain event listening
    #[serde(default)]
    pub contract_address: Option<String>,

    #[serde(default)]
    pub media: Vec<Media>,
    /// Event history embedded in the API response
    #[serde(default)]
    pub events: Vec<SaleEvent>,
}

impl CollectableSnapshot {
    /// Parse a snapshot from the marketplace API JSON
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check if this collectable is sold by auction
    pub fn is_auction(&self) -> bool {
        self.purchase_type == PurchaseType::Auction
    }

    /// Check if this collectable includes a token
    pub fn is_nft(&self) -> bool {
        matches!(
            self.collectable_type,
            Some(CollectableType::Nft | CollectableType::TangibleNft)
        )
    }

    /// Check if this collectable includes a physical item
    pub fn is_tangible(&self) -> bool {
        matches!(
            self.collectable_type,
            Some(CollectableType::Tangible | CollectableType::TangibleNft)
        )
    }

    /// Check if a non-empty contract address is present
    pub fn has_contract_address(&self) -> bool {
        self.contract_address
            .as_deref()
            .is_some_and(|addr| !addr.trim().is_empty())
    }

    /// Minimum start, falling back to the scheduled start
    pub fn effective_minimum_starts_at(&self) -> Option<DateTime<Utc>> {
        self.minimum_starts_at.or(self.starts_at)
    }
}

/// Errors raised while loading collectable data
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Payload was not valid JSON for the expected shape
    #[error("Invalid collectable payload: {0}")]
    Json(#[from] serde_json::Error),
}
