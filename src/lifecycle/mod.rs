//! Lifecycle module
//!
//! Sale status (waiting, live, sold out, ended, ...) and its card label

mod classifier;
mod types;

pub use classifier::{classify, LifecycleInputs};
pub use types::LifecycleStatus;
