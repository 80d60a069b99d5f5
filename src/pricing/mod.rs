//! Pricing module
//!
//! Price, USD equivalents and inventory counters for a collectable card

mod converter;
mod deriver;

pub use converter::{FixedRate, RateConverter, SharedRate};
pub use deriver::{round_to, PricingState, StateDeriver};
