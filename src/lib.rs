//! collectable-state: view state for marketplace collectable cards
//!
//! This library provides the core components for:
//! - Collectable snapshot model and media selection
//! - Sale event decoding and feed merging
//! - Price, USD equivalent and inventory derivation
//! - Lifecycle status classification and card labels
//! - Scheduled activation of on-chain event listening
//! - A card controller tying these together for the rendering layer

pub mod activation;
pub mod card;
pub mod cli;
pub mod collectable;
pub mod config;
pub mod events;
pub mod lifecycle;
pub mod pricing;
pub mod telemetry;
