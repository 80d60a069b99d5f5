//! Activation module
//!
//! Starts on-chain event listening for a collectable around its sale window

mod decision;
mod scheduler;

pub use decision::{ActivationDecision, ActivationInputs, ActivationWindow};
pub use scheduler::ActivationScheduler;

use crate::collectable::CollectableSnapshot;

/// Trait for on-chain event source implementations
pub trait EventSource: Send + Sync {
    /// Start listening for contract events for this collectable
    fn initialize(&self, snapshot: &CollectableSnapshot);
}
