//! One-shot activation timer
//!
//! Owns at most one pending activation. Applying a new decision cancels the
//! previous one first, and dropping the scheduler cancels whatever is left.

use super::{ActivationDecision, EventSource};
use crate::collectable::CollectableSnapshot;
use crate::telemetry::{increment, CounterMetric};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Applies activation decisions against an event source
pub struct ActivationScheduler {
    source: Arc<dyn EventSource>,
    pending: Option<JoinHandle<()>>,
}

impl ActivationScheduler {
    /// Create a scheduler for the given event source
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self {
            source,
            pending: None,
        }
    }

    /// Apply a decision, replacing any pending activation
    pub fn apply(&mut self, decision: ActivationDecision, snapshot: &CollectableSnapshot) {
        self.cancel();

        match decision {
            ActivationDecision::Activate => {
                tracing::info!(title = %snapshot.title, "Activating event source");
                increment(CounterMetric::ActivationImmediate);
                self.source.initialize(snapshot);
            }
            ActivationDecision::ScheduleAt(delay) => {
                let handle = match Handle::try_current() {
                    Ok(handle) => handle,
                    Err(e) => {
                        tracing::warn!(error = %e, "No runtime available, activation not scheduled");
                        return;
                    }
                };

                tracing::info!(
                    title = %snapshot.title,
                    delay_ms = delay.as_millis() as u64,
                    "Scheduling event source activation"
                );
                increment(CounterMetric::ActivationScheduled);

                let source = Arc::clone(&self.source);
                let snapshot = snapshot.clone();
                self.pending = Some(handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    tracing::info!(title = %snapshot.title, "Sale starting soon, activating event source");
                    source.initialize(&snapshot);
                }));
            }
            ActivationDecision::Skip => {
                tracing::debug!(title = %snapshot.title, "Event source activation skipped");
            }
        }
    }

    /// Cancel the pending activation, if any
    ///
    /// Returns true if an activation was still waiting to fire.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                increment(CounterMetric::ActivationCancelled);
                tracing::debug!("Cancelled pending activation");
                true
            }
            _ => false,
        }
    }

    /// Check whether an activation is waiting to fire
    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ActivationScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
