//! # Compatibility Graph
//!
//! Request-scoped bipartite graph between the resource types on hand and the
//! slots of one request. Built once per request, immutable during the search.

use std::hash::Hash;

use crate::bitset::BitPlane;
use crate::ledger::ResourceLedger;
use crate::slot::Slot;

/// Items × slots compatibility matrix.
///
/// Items are the distinct resource types with a positive ledger quantity that
/// fit at least one slot, indexed `0..M` in ledger insertion order. Edge
/// `(item, slot)` lives at bit `item * N + slot`.
#[derive(Clone, Debug)]
pub struct CompatibilityGraph<K> {
    items: Vec<K>,
    slot_count: usize,
    edges: BitPlane,
}

impl<K: Clone + Eq + Hash> CompatibilityGraph<K> {
    /// Builds the graph for `slots` against the current ledger contents.
    #[must_use]
    pub fn build<S: Slot<K>>(ledger: &ResourceLedger<K>, slots: &[S]) -> Self {
        let slot_count = slots.len();
        let mut items = Vec::new();
        let mut rows: Vec<Vec<usize>> = Vec::new();

        for (resource, quantity) in ledger.iter() {
            if quantity <= 0 {
                continue;
            }
            let row: Vec<usize> = slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.accepts(resource))
                .map(|(index, _)| index)
                .collect();
            if !row.is_empty() {
                items.push(resource.clone());
                rows.push(row);
            }
        }

        let mut edges = BitPlane::new(items.len() * slot_count);
        for (item, row) in rows.iter().enumerate() {
            for &slot in row {
                edges.set(item * slot_count + slot);
            }
        }

        Self {
            items,
            slot_count,
            edges,
        }
    }

    /// Necessary bound on any feasible uniform quantity.
    ///
    /// For every slot takes the largest quantity among its compatible types,
    /// then the minimum over slots. `0` when some slot has no compatible type
    /// on hand; `i64::MAX` for an empty request.
    #[must_use]
    pub fn upper_bound(&self, ledger: &ResourceLedger<K>) -> i64 {
        (0..self.slot_count)
            .map(|slot| {
                self.items_for(slot)
                    .map(|item| ledger.quantity(&self.items[item]))
                    .max()
                    .unwrap_or(0)
            })
            .min()
            .unwrap_or(i64::MAX)
    }
}

impl<K> CompatibilityGraph<K> {
    /// Number of item nodes (M).
    #[inline]
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of slot nodes (N).
    #[inline]
    #[must_use]
    pub const fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Resource type behind an item index.
    #[inline]
    #[must_use]
    pub fn resource(&self, item: usize) -> &K {
        &self.items[item]
    }

    /// All item nodes in index order.
    #[must_use]
    pub fn resources(&self) -> &[K] {
        &self.items
    }

    /// True if `item` can fill `slot`.
    #[inline]
    #[must_use]
    pub fn is_compatible(&self, item: usize, slot: usize) -> bool {
        slot < self.slot_count && self.edges.get(item * self.slot_count + slot)
    }

    /// The raw edge plane, indexed `item * N + slot`.
    #[must_use]
    pub fn edges(&self) -> &BitPlane {
        &self.edges
    }

    /// Items compatible with `slot`, ascending.
    pub fn items_for(&self, slot: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.items.len()).filter(move |&item| self.is_compatible(item, slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::AnyOf;

    #[test]
    fn test_excludes_empty_and_unused_types() {
        let mut ledger = ResourceLedger::new();
        ledger.account("wood", 3);
        ledger.account("dirt", 9);
        ledger.account("stone", 0);
        let slots = [AnyOf::new(["wood", "stone"]), AnyOf::single("stone")];

        let graph = CompatibilityGraph::build(&ledger, &slots);
        assert_eq!(graph.resources(), &["wood"]);
        assert_eq!(graph.slot_count(), 2);
        assert!(graph.is_compatible(0, 0));
        assert!(!graph.is_compatible(0, 1));
        assert!(!graph.is_compatible(0, 2));
    }

    #[test]
    fn test_upper_bound() {
        let mut ledger = ResourceLedger::new();
        ledger.account("wood", 3);
        ledger.account("stone", 8);
        ledger.account("iron", 2);
        let slots = [AnyOf::new(["wood", "stone"]), AnyOf::single("iron")];

        let graph = CompatibilityGraph::build(&ledger, &slots);
        assert_eq!(graph.upper_bound(&ledger), 2);
    }

    #[test]
    fn test_upper_bound_degenerate() {
        let mut ledger = ResourceLedger::new();
        ledger.account("wood", 3);

        let none: [AnyOf<&str>; 0] = [];
        assert_eq!(CompatibilityGraph::build(&ledger, &none).upper_bound(&ledger), i64::MAX);

        let starved = [AnyOf::single("wood"), AnyOf::single("gold")];
        assert_eq!(CompatibilityGraph::build(&ledger, &starved).upper_bound(&ledger), 0);
    }
}
