//! Card metrics
//!
//! Recorded through the `metrics` facade; without an installed recorder
//! these calls are no-ops.

/// Counter metric types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterMetric {
    /// Full recomputation of derived state
    Recomputation,
    /// Event source activated immediately
    ActivationImmediate,
    /// Event source activation scheduled for later
    ActivationScheduled,
    /// Pending activation cancelled before firing
    ActivationCancelled,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeMetric {
    /// Remaining stock ratio of the last derived card
    ProgressRatio,
    /// Remaining units of the last derived card
    ItemsRemaining,
}

impl CounterMetric {
    /// Metric name
    pub fn name(&self) -> &'static str {
        match self {
            CounterMetric::Recomputation => "collectable_recomputations_total",
            CounterMetric::ActivationImmediate => "collectable_activations_immediate_total",
            CounterMetric::ActivationScheduled => "collectable_activations_scheduled_total",
            CounterMetric::ActivationCancelled => "collectable_activations_cancelled_total",
        }
    }
}

impl GaugeMetric {
    /// Metric name
    pub fn name(&self) -> &'static str {
        match self {
            GaugeMetric::ProgressRatio => "collectable_progress_ratio",
            GaugeMetric::ItemsRemaining => "collectable_items_remaining",
        }
    }
}

/// Increment a counter by one
pub fn increment(metric: CounterMetric) {
    ::metrics::counter!(metric.name()).increment(1);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    ::metrics::gauge!(metric.name()).set(value);
    tracing::trace!(metric = metric.name(), value = value, "Setting gauge");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_unique() {
        let names = [
            CounterMetric::Recomputation.name(),
            CounterMetric::ActivationImmediate.name(),
            CounterMetric::ActivationScheduled.name(),
            CounterMetric::ActivationCancelled.name(),
            GaugeMetric::ProgressRatio.name(),
            GaugeMetric::ItemsRemaining.name(),
        ];
        let mut sorted = names.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), names.len());
    }

    #[test]
    fn test_record_without_recorder() {
        increment(CounterMetric::Recomputation);
        set_gauge(GaugeMetric::ProgressRatio, 0.5);
    }
}
