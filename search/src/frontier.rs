//! Open list: a min-heap by [`FrontierKey`] plus a map from state key to the
//! best live entry.
//!
//! Replacing an entry does not touch the heap; the superseded heap entry
//! goes stale and is skipped when popped.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::node::FrontierKey;

/// A heap entry. `BinaryHeap` is a max-heap, so the key is wrapped in
/// `Reverse` to pop the lowest `f_cost` first.
#[derive(Debug)]
struct HeapEntry {
    order: Reverse<FrontierKey>,
    node_id: u64,
    state_key: String,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.order.cmp(&other.order)
    }
}

/// Best known entry for one state key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenSlot {
    pub node_id: u64,
    pub g_cost: u64,
    pub order: FrontierKey,
}

/// Open list with O(log n) push/pop and O(1) best-entry lookup.
#[derive(Debug, Default)]
pub struct OpenList {
    heap: BinaryHeap<HeapEntry>,
    best: HashMap<String, OpenSlot>,
    high_water: u64,
}

impl OpenList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `state_key`.
    ///
    /// Returns the node id it replaced, if any. The caller decides whether a
    /// replacement is an improvement; this method does not compare costs.
    pub fn upsert(&mut self, state_key: &str, slot: OpenSlot) -> Option<u64> {
        let previous = self.best.insert(state_key.to_string(), slot);
        self.heap.push(HeapEntry {
            order: Reverse(slot.order),
            node_id: slot.node_id,
            state_key: state_key.to_string(),
        });
        let size = self.best.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        previous.map(|p| p.node_id)
    }

    /// Pop the best live entry, skipping stale heap entries.
    pub fn pop(&mut self) -> Option<(String, OpenSlot)> {
        while let Some(entry) = self.heap.pop() {
            let live = self
                .best
                .get(&entry.state_key)
                .is_some_and(|s| s.node_id == entry.node_id);
            if live {
                if let Some(slot) = self.best.remove(&entry.state_key) {
                    return Some((entry.state_key, slot));
                }
            }
        }
        None
    }

    /// Best entry currently held for `state_key`.
    #[must_use]
    pub fn get(&self, state_key: &str) -> Option<&OpenSlot> {
        self.best.get(state_key)
    }

    /// Live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.best.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// Largest number of live entries ever held.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Up to `limit` live entries in pop order. Does not mutate the list.
    #[must_use]
    pub fn snapshot(&self, limit: usize) -> Vec<(&str, OpenSlot)> {
        let mut live: Vec<(&str, OpenSlot)> = self
            .best
            .iter()
            .map(|(k, s)| (k.as_str(), *s))
            .collect();
        live.sort_by_key(|(_, s)| s.order);
        live.truncate(limit);
        live
    }
}
