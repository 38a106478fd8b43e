//! # Match Engine - Capacity-Constrained Bipartite Matching
//!
//! Decides whether every slot of a request can be filled with the same
//! per-slot quantity `q` without spending more of any resource type than the
//! ledger holds.
//!
//! ## Algorithm
//!
//! Kuhn-style augmenting paths over the compatibility graph:
//!
//! ```text
//! loop:
//!   for each unvisited item t with ledger[t] >= q:
//!     DFS  item --(unassigned edge)--> slot --(assigned edge)--> item ...
//!     stop at the first unsatisfied slot
//!   none found -> done; feasible iff every slot is satisfied
//!   found      -> take q of t, satisfy the terminal slot, flip path edges
//! ```
//!
//! Only the item starting a path gains a use; every other item on the path
//! trades one slot for another. An item may therefore hold several slots at
//! once, bounded by `floor(quantity / q)`.
//!
//! ## Ledger Contract
//!
//! Debits happen mid-search and are always credited back before the attempt
//! returns. The engine's net effect on the ledger is zero; callers that want
//! the spend to stick re-apply it from the reported assignment (see
//! [`ResourceAccountingFacade::consume`](crate::ResourceAccountingFacade::consume)).

use std::hash::Hash;

use crate::bitset::BitPlane;
use crate::graph::CompatibilityGraph;
use crate::ledger::ResourceLedger;
use crate::slot::Slot;

/// Matching engine for one request against one ledger.
///
/// Holds the ledger exclusively for its lifetime, so the graph built at
/// construction stays valid across repeated [`try_pick`](Self::try_pick) calls.
pub struct MatchEngine<'a, K> {
    ledger: &'a mut ResourceLedger<K>,
    graph: CompatibilityGraph<K>,
}

impl<'a, K: Clone + Eq + Hash> MatchEngine<'a, K> {
    /// Builds the compatibility graph for `slots` and binds the ledger.
    #[must_use]
    pub fn new<S: Slot<K>>(ledger: &'a mut ResourceLedger<K>, slots: &[S]) -> Self {
        let graph = CompatibilityGraph::build(ledger, slots);
        Self { ledger, graph }
    }

    /// The request's compatibility graph.
    #[must_use]
    pub fn graph(&self) -> &CompatibilityGraph<K> {
        &self.graph
    }

    /// The bound ledger.
    #[must_use]
    pub fn ledger(&self) -> &ResourceLedger<K> {
        self.ledger
    }

    /// Feasibility probe for a uniform per-slot `quantity`.
    ///
    /// Leaves the ledger exactly as it found it. `quantity <= 0` is trivially
    /// feasible.
    pub fn try_pick(&mut self, quantity: i64) -> bool {
        self.pick(quantity, None)
    }

    /// Like [`try_pick`](Self::try_pick), and on success calls `report` once per
    /// slot with `(slot_index, resource_type)`, in slot order.
    ///
    /// Nothing is reported on failure or when `quantity <= 0`.
    pub fn try_pick_with<F>(&mut self, quantity: i64, mut report: F) -> bool
    where
        F: FnMut(usize, &K),
    {
        self.pick(quantity, Some(&mut report))
    }

    fn pick(&mut self, quantity: i64, mut report: Option<&mut dyn FnMut(usize, &K)>) -> bool {
        if quantity <= 0 {
            return true;
        }

        let graph = &self.graph;
        let ledger = &mut *self.ledger;
        let mut state = MatchState::new(graph);
        let mut rounds = 0usize;

        while state.satisfied.count_ones() < state.slot_count {
            let Some(start) = state.find_augmenting_path(graph, ledger, quantity) else {
                break;
            };
            ledger.debit(graph.resource(start), quantity);
            state.augment();
            rounds += 1;
            tracing::trace!(
                "augmenting round {}: item {} now covers {}/{} slots",
                rounds,
                start,
                state.satisfied.count_ones(),
                state.slot_count
            );
        }

        let feasible = state.satisfied.count_ones() == state.slot_count;

        // Unwind: give every tentative use back, reporting on success.
        for slot in state.satisfied.iter_ones() {
            let Some(item) = state.assigned_item(slot) else {
                continue;
            };
            let edge = state.edge(item, slot);
            state.assigned.toggle(edge);
            let resource = graph.resource(item);
            if feasible {
                if let Some(report) = report.as_deref_mut() {
                    report(slot, resource);
                }
            }
            // Restores an amount debited this attempt, so it cannot overflow.
            let restored = ledger.credit(resource.clone(), quantity);
            debug_assert!(restored.is_ok(), "unwind credit failed: {restored:?}");
        }

        tracing::debug!(
            "match attempt: slots={}, items={}, quantity={}, feasible={}",
            state.slot_count,
            state.item_count,
            quantity,
            feasible
        );
        feasible
    }
}

/// Search-scoped scratch state.
///
/// Five bit planes plus the current DFS path. The satisfied count is the
/// population of `satisfied`. Allocated per attempt and
/// dropped when the attempt returns.
struct MatchState {
    slot_count: usize,
    item_count: usize,
    visited_slot: BitPlane,
    visited_item: BitPlane,
    satisfied: BitPlane,
    compatible: BitPlane,
    assigned: BitPlane,
    /// Alternating `item, slot, item, slot, ...` node indices.
    path: Vec<usize>,
}

impl MatchState {
    fn new<K>(graph: &CompatibilityGraph<K>) -> Self {
        let slot_count = graph.slot_count();
        let item_count = graph.item_count();
        Self {
            slot_count,
            item_count,
            visited_slot: BitPlane::new(slot_count),
            visited_item: BitPlane::new(item_count),
            satisfied: BitPlane::new(slot_count),
            compatible: graph.edges().clone(),
            assigned: BitPlane::new(item_count * slot_count),
            path: Vec::with_capacity(2 * slot_count.min(item_count) + 2),
        }
    }

    #[inline]
    const fn edge(&self, item: usize, slot: usize) -> usize {
        item * self.slot_count + slot
    }

    fn assigned_item(&self, slot: usize) -> Option<usize> {
        (0..self.item_count).find(|&item| self.assigned.get(self.edge(item, slot)))
    }

    /// From an item, the first unvisited slot it can take over an unassigned edge.
    fn next_slot(&self, item: usize) -> Option<usize> {
        (0..self.slot_count).find(|&slot| {
            let edge = self.edge(item, slot);
            !self.visited_slot.get(slot) && self.compatible.get(edge) && !self.assigned.get(edge)
        })
    }

    /// From a satisfied slot, the item currently holding it, if not yet visited.
    fn next_item(&self, slot: usize) -> Option<usize> {
        self.assigned_item(slot)
            .filter(|&item| !self.visited_item.get(item))
    }

    /// Searches for an augmenting path. On success the path is left in
    /// `self.path` and the starting item is returned.
    fn find_augmenting_path<K: Eq + Hash>(
        &mut self,
        graph: &CompatibilityGraph<K>,
        ledger: &ResourceLedger<K>,
        quantity: i64,
    ) -> Option<usize> {
        self.visited_slot.reset();
        self.visited_item.reset();
        self.path.clear();

        for start in 0..self.item_count {
            if self.visited_item.get(start) || !ledger.has_at_least(graph.resource(start), quantity) {
                continue;
            }
            self.visited_item.set(start);
            self.path.push(start);

            while let Some(&node) = self.path.last() {
                let at_item = self.path.len() % 2 == 1;
                if !at_item && !self.satisfied.get(node) {
                    return Some(start);
                }

                if at_item {
                    if let Some(slot) = self.next_slot(node) {
                        self.visited_slot.set(slot);
                        self.path.push(slot);
                        continue;
                    }
                } else if let Some(item) = self.next_item(node) {
                    self.visited_item.set(item);
                    self.path.push(item);
                    continue;
                }

                // Dead end
                self.path.pop();
            }
        }

        None
    }

    /// Satisfies the path's terminal slot and flips every edge along it.
    fn augment(&mut self) {
        let Some(&terminal) = self.path.last() else {
            return;
        };
        self.satisfied.set(terminal);

        // Pairs alternate item->slot (now assigned) and slot->item (now released).
        for (step, pair) in self.path.windows(2).enumerate() {
            let edge = if step % 2 == 0 {
                self.edge(pair[0], pair[1])
            } else {
                self.edge(pair[1], pair[0])
            };
            self.assigned.toggle(edge);
        }
        self.path.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::AnyOf;

    fn ledger(entries: &[(&'static str, i64)]) -> ResourceLedger<&'static str> {
        let mut ledger = ResourceLedger::new();
        for &(kind, quantity) in entries {
            ledger.account(kind, quantity);
        }
        ledger
    }

    #[test]
    fn test_disjoint_slots() {
        let mut ledger = ledger(&[("wood", 3), ("stone", 2)]);
        let slots = [AnyOf::single("wood"), AnyOf::single("stone")];
        let mut engine = MatchEngine::new(&mut ledger, &slots);

        let mut used = Vec::new();
        assert!(engine.try_pick_with(1, |slot, kind| used.push((slot, *kind))));
        assert_eq!(used, vec![(0, "wood"), (1, "stone")]);
        assert_eq!(ledger.quantity(&"wood"), 3);
        assert_eq!(ledger.quantity(&"stone"), 2);
    }

    #[test]
    fn test_oversubscribed_single_unit() {
        let mut ledger = ledger(&[("wood", 1)]);
        let slots = [AnyOf::single("wood"), AnyOf::single("wood")];
        let mut engine = MatchEngine::new(&mut ledger, &slots);

        let mut reported = 0;
        assert!(!engine.try_pick_with(1, |_, _| reported += 1));
        assert_eq!(reported, 0);
        assert_eq!(ledger.quantity(&"wood"), 1);
    }

    #[test]
    fn test_reassignment_through_augmenting_path() {
        // Greedy would give stone to slot 0 and starve slot 1.
        let mut ledger = ledger(&[("stone", 1), ("wood", 1)]);
        let slots = [AnyOf::new(["wood", "stone"]), AnyOf::single("stone")];
        let mut engine = MatchEngine::new(&mut ledger, &slots);

        let mut used = vec![""; 2];
        assert!(engine.try_pick_with(1, |slot, kind| used[slot] = *kind));
        assert_eq!(used, vec!["wood", "stone"]);
    }

    #[test]
    fn test_multi_use_of_one_type() {
        let mut ledger = ledger(&[("wood", 10)]);
        let slots = [AnyOf::single("wood"), AnyOf::single("wood"), AnyOf::single("wood")];
        let mut engine = MatchEngine::new(&mut ledger, &slots);

        assert!(engine.try_pick(3));
        assert!(!engine.try_pick(4));
        assert_eq!(engine.ledger().quantity(&"wood"), 10);
    }

    #[test]
    fn test_non_positive_quantity_is_trivial() {
        let mut ledger = ledger(&[]);
        let slots = [AnyOf::single("gold")];
        let mut engine = MatchEngine::new(&mut ledger, &slots);

        let mut reported = false;
        assert!(engine.try_pick_with(0, |_, _| reported = true));
        assert!(engine.try_pick(-5));
        assert!(!reported);
        assert!(!engine.try_pick(1));
    }

    #[test]
    fn test_unwind_restores_full_quantities() {
        let mut ledger = ledger(&[("wood", i64::MAX), ("stone", i64::MAX)]);

        let short = [AnyOf::new(["wood", "stone"]), AnyOf::single("stone"), AnyOf::single("wood")];
        let mut engine = MatchEngine::new(&mut ledger, &short);
        assert!(!engine.try_pick(i64::MAX));
        assert_eq!(engine.ledger().quantity(&"wood"), i64::MAX);
        assert_eq!(engine.ledger().quantity(&"stone"), i64::MAX);

        let slots = [AnyOf::new(["wood", "stone"]), AnyOf::single("stone")];
        let mut engine = MatchEngine::new(&mut ledger, &slots);
        let mut used = Vec::new();
        assert!(engine.try_pick_with(i64::MAX, |slot, kind| used.push((slot, *kind))));
        assert_eq!(used, vec![(0, "wood"), (1, "stone")]);
        assert_eq!(engine.ledger().quantity(&"wood"), i64::MAX);
        assert_eq!(engine.ledger().quantity(&"stone"), i64::MAX);
    }

    #[test]
    fn test_empty_request_is_feasible() {
        let mut ledger = ledger(&[("wood", 1)]);
        let slots: [AnyOf<&str>; 0] = [];
        let mut engine = MatchEngine::new(&mut ledger, &slots);
        assert!(engine.try_pick(1_000));
    }

    #[test]
    fn test_long_alternating_chain() {
        // Slot i accepts items i and i+1, the last slot only item n. Items are
        // accounted high to low, so each one first grabs the lower of its two
        // slots and item 0 can only get in by shifting the whole chain.
        let n = 6usize;
        let mut ledger = ResourceLedger::new();
        for item in (0..=n).rev() {
            ledger.account(item, 1);
        }
        let mut slots: Vec<AnyOf<usize>> = (0..n).map(|i| AnyOf::new([i, i + 1])).collect();
        slots.push(AnyOf::single(n));
        let mut engine = MatchEngine::new(&mut ledger, &slots);

        let mut used = vec![usize::MAX; n + 1];
        assert!(engine.try_pick_with(1, |slot, item| used[slot] = *item));
        assert_eq!(used, (0..=n).collect::<Vec<_>>());
        assert!(ledger.iter().all(|(_, quantity)| quantity == 1));
    }

    #[test]
    fn test_closure_slots() {
        let mut ledger = ResourceLedger::new();
        ledger.account(4u32, 2);
        ledger.account(7u32, 2);
        let even = |n: &u32| n % 2 == 0;
        let odd = |n: &u32| n % 2 == 1;
        let slots: [&dyn Fn(&u32) -> bool; 2] = [&even, &odd];
        let mut engine = MatchEngine::new(&mut ledger, &slots);
        assert!(engine.try_pick(2));
        assert!(!engine.try_pick(3));
    }
}
