//! Sale event types

use super::decode::{deserialize_amount, try_decode_amount};
use crate::collectable::timestamp;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchase or bid recorded against a collectable
///
/// Events come from two places: the API response embeds the history known at
/// load time, and the on-chain listener streams new ones. Only one of
/// `amount`, `value`/`value_in_usd` or `raw` is usually populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleEvent {
    /// Transaction or log key, used for deduplication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Creation time, the sort key
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    /// Quantity sold
    #[serde(
        default,
        deserialize_with = "deserialize_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<u64>,
    /// Bid or sale value in ETH
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
    /// Bid or sale value in USD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_in_usd: Option<Decimal>,
    /// Undecoded on-chain payload, JSON carrying an `amount` field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl SaleEvent {
    /// Create an event with only a timestamp set
    pub fn at(created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            created_at,
            amount: None,
            value: None,
            value_in_usd: None,
            raw: None,
        }
    }

    /// Set the quantity sold
    pub fn with_amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the ETH value
    pub fn with_value(mut self, value: Decimal) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the USD value
    pub fn with_value_in_usd(mut self, value_in_usd: Decimal) -> Self {
        self.value_in_usd = Some(value_in_usd);
        self
    }

    /// Set the raw on-chain payload
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }

    /// Set the deduplication key
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Explicit quantity, ignoring zero
    pub fn explicit_amount(&self) -> Option<u64> {
        self.amount.filter(|a| *a > 0)
    }

    /// Quantity decoded from the raw payload, if any
    pub fn raw_amount(&self) -> Option<u64> {
        self.raw.as_deref().and_then(try_decode_amount)
    }

    /// Units this event removed from stock
    ///
    /// Explicit amount first, then the raw payload; undecodable events count as zero.
    pub fn units(&self) -> u64 {
        self.explicit_amount()
            .or_else(|| self.raw_amount())
            .unwrap_or(0)
    }
}
