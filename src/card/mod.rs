//! Card module
//!
//! Host-facing controller tying the deriver, classifier and activation
//! scheduler together for one collectable card

mod chain;
mod controller;
mod state;
mod view;

pub use chain::{ChainUpdate, VrfStatus};
pub use controller::CollectableCard;
pub use state::{derive_state, DerivedState};
pub use view::CardView;
