//! Collectable module
//!
//! Snapshot data model for a sellable item plus its static display helpers

mod media;
pub mod timestamp;
mod types;

pub use media::{first_media, gallery_media};
pub use types::{CollectableSnapshot, CollectableType, Media, PurchaseType, SnapshotError};
