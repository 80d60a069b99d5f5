//! Read-only card surface for the rendering layer

use super::{CollectableCard, DerivedState, VrfStatus};
use crate::collectable::{first_media, gallery_media, CollectableType, Media};
use crate::events::SaleEvent;
use crate::lifecycle::LifecycleStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Snapshot fields, derived state and classifiers, as rendered on a card
#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub title: String,
    pub description: Option<String>,
    pub artist: Option<serde_json::Value>,
    pub artist_statement: Option<String>,
    #[serde(rename = "type")]
    pub collectable_type: Option<CollectableType>,
    pub version: Option<serde_json::Value>,
    pub edition: u64,
    pub edition_of: u64,
    pub claim: Option<serde_json::Value>,
    pub pill_override: Option<String>,
    pub requires_registration: bool,
    pub bundle_child_items: Vec<serde_json::Value>,

    pub media: Vec<Media>,
    pub first_media: String,
    pub gallery_media: Vec<Media>,

    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub minimum_starts_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub state: DerivedState,
    pub live_status: &'static str,

    pub is_nft: bool,
    pub is_tangible: bool,
    pub is_auction: bool,
    pub is_upcoming: bool,
    pub is_open_edition: bool,
    pub is_vrf_sale: bool,
    pub is_sold_out: bool,
    pub is_closed: bool,
    pub is_active: bool,

    pub items_bought: Option<u64>,
    pub vrf: VrfStatus,
    pub events: Vec<SaleEvent>,
}

impl CardView {
    /// Build the view for a card's current state
    pub fn from_card(card: &CollectableCard) -> Self {
        let snapshot = card.snapshot();
        let state = card.state().clone();
        let is_auction = snapshot.is_auction();
        let status = state.lifecycle_status;

        Self {
            title: snapshot.title.clone(),
            description: snapshot.description.clone(),
            artist: snapshot.artist.clone(),
            artist_statement: snapshot.artist_statement.clone(),
            collectable_type: snapshot.collectable_type,
            version: snapshot.version.clone(),
            edition: snapshot.edition,
            edition_of: snapshot.edition_of,
            claim: snapshot.claim.clone(),
            pill_override: snapshot.pill_override.clone(),
            requires_registration: snapshot.requires_registration,
            bundle_child_items: snapshot.bundle_child_items.clone(),

            media: snapshot.media.clone(),
            first_media: first_media(&snapshot.media),
            gallery_media: gallery_media(&snapshot.media),

            starts_at: snapshot.starts_at,
            ends_at: snapshot.ends_at,
            minimum_starts_at: snapshot.effective_minimum_starts_at(),

            live_status: status.label(is_auction),
            is_nft: snapshot.is_nft(),
            is_tangible: snapshot.is_tangible(),
            is_auction,
            is_upcoming: status == LifecycleStatus::Waiting,
            is_open_edition: snapshot.is_open_edition,
            is_vrf_sale: snapshot.is_vrf_drop,
            is_sold_out: state.is_sold_out(is_auction),
            is_closed: snapshot.is_closed,
            is_active: status.is_active(),
            state,

            items_bought: card.items_bought(),
            vrf: card.vrf_status(),
            events: card.events().to_vec(),
        }
    }
}
