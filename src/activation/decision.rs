//! Activation decision
//!
//! Decides whether on-chain event listening should start now, start later,
//! or not at all. Listening opens shortly before the sale starts and stays
//! open for a grace period after it ends so late settlement events still land.

use crate::collectable::timestamp::is_epoch_zero;
use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// What to do about event-source activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationDecision {
    /// Activate listening immediately
    Activate,
    /// Activate listening once the delay elapses
    ScheduleAt(std::time::Duration),
    /// Do not activate
    Skip,
}

impl fmt::Display for ActivationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivationDecision::Activate => write!(f, "activate"),
            ActivationDecision::ScheduleAt(delay) => {
                write!(f, "schedule in {}ms", delay.as_millis())
            }
            ActivationDecision::Skip => write!(f, "skip"),
        }
    }
}

/// Inputs to an activation decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationInputs {
    pub now: DateTime<Utc>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub has_contract_address: bool,
    pub is_sold_out: bool,
    pub is_vrf_drop: bool,
    pub is_closed: bool,
    pub is_reserve_price_auction: bool,
}

/// Listening window around a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationWindow {
    /// How long before the start listening opens
    pub lead_time: Duration,
    /// How long after the end listening stays open
    pub grace_period: Duration,
}

impl Default for ActivationWindow {
    fn default() -> Self {
        Self {
            lead_time: Duration::minutes(15),
            grace_period: Duration::hours(6),
        }
    }
}

impl ActivationWindow {
    /// Create a window with custom lead and grace durations
    pub fn new(lead_time: Duration, grace_period: Duration) -> Self {
        Self {
            lead_time,
            grace_period,
        }
    }

    /// Effective listening bounds, if both sale bounds are known
    pub fn bounds(
        &self,
        starts_at: Option<DateTime<Utc>>,
        ends_at: Option<DateTime<Utc>>,
    ) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = starts_at?.checked_sub_signed(self.lead_time)?;
        let end = ends_at?.checked_add_signed(self.grace_period)?;
        Some((start, end))
    }

    /// Decide what to do about activation
    ///
    /// VRF drops listen for their whole life until closed, and reserve
    /// auctions without a scheduled end listen until a reserve bid sets one.
    /// A missing start or end means there is no window to schedule against.
    pub fn evaluate(&self, inputs: &ActivationInputs) -> ActivationDecision {
        if !inputs.has_contract_address {
            return ActivationDecision::Skip;
        }

        let now = inputs.now;
        let bounds = self.bounds(inputs.starts_at, inputs.ends_at);
        let in_window = bounds.is_some_and(|(start, end)| start <= now && now < end);
        let no_end = inputs.ends_at.map_or(true, |end| is_epoch_zero(&end));

        if (in_window && !inputs.is_sold_out)
            || (inputs.is_vrf_drop && !inputs.is_closed)
            || (no_end && inputs.is_reserve_price_auction)
        {
            return ActivationDecision::Activate;
        }

        match bounds {
            Some((start, end)) if now < end && !inputs.is_sold_out => {
                match (start - now).to_std() {
                    Ok(delay) => ActivationDecision::ScheduleAt(delay),
                    // Start already passed: the window check above covers this
                    Err(_) => ActivationDecision::Activate,
                }
            }
            _ => ActivationDecision::Skip,
        }
    }
}
