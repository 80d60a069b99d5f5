//! Merging of event feeds

use super::SaleEvent;
use std::collections::HashSet;

/// Sort events ascending by creation time, keeping arrival order for ties
pub fn sort_by_created_at(events: &mut [SaleEvent]) {
    events.sort_by_key(|e| e.created_at);
}

/// Merge an incoming feed into an existing one
///
/// Events with an `id` are deduplicated by id; events without one are
/// deduplicated by full equality. The result is sorted by creation time.
pub fn merge(existing: &[SaleEvent], incoming: &[SaleEvent]) -> Vec<SaleEvent> {
    let mut merged: Vec<SaleEvent> = Vec::with_capacity(existing.len() + incoming.len());
    let mut seen_ids: HashSet<&str> = HashSet::with_capacity(merged.capacity());
    let mut anonymous: Vec<&SaleEvent> = Vec::new();

    for event in existing.iter().chain(incoming) {
        let fresh = match event.id.as_deref() {
            Some(id) => seen_ids.insert(id),
            None if anonymous.contains(&event) => false,
            None => {
                anonymous.push(event);
                true
            }
        };
        if fresh {
            merged.push(event.clone());
        }
    }

    sort_by_created_at(&mut merged);
    merged
}
