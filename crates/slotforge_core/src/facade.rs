//! # Resource Accounting Facade
//!
//! Owns a ledger and exposes the query surface callers actually use:
//! capped accounting of raw entries, "can satisfy", "largest batch", and the
//! committing variants that make a successful match's spend permanent.
//!
//! ## Example
//!
//! ```rust
//! use slotforge_core::{AnyOf, ResourceAccountingFacade};
//!
//! let mut pool = ResourceAccountingFacade::new();
//! pool.account_entry("planks", 80, 64); // one entry contributes at most 64
//! pool.account_entry("planks", 10, 64);
//!
//! let slots = [AnyOf::single("planks"), AnyOf::single("planks")];
//! assert_eq!(pool.largest_satisfiable_batch(&slots, 100), 37);
//! ```

use std::hash::Hash;

use crate::engine::MatchEngine;
use crate::graph::CompatibilityGraph;
use crate::ledger::ResourceLedger;
use crate::slot::Slot;
use crate::solver::BatchSolver;

/// A resource pool with matching queries on top.
#[derive(Clone, Debug)]
pub struct ResourceAccountingFacade<K> {
    ledger: ResourceLedger<K>,
}

impl<K> Default for ResourceAccountingFacade<K> {
    fn default() -> Self {
        Self {
            ledger: ResourceLedger::default(),
        }
    }
}

impl<K: Clone + Eq + Hash> ResourceAccountingFacade<K> {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts one physical entry, contributing at most `per_entry_cap`.
    ///
    /// Non-positive contributions are ignored.
    pub fn account_entry(&mut self, resource: K, raw_count: i64, per_entry_cap: i64) {
        let amount = raw_count.min(per_entry_cap);
        if amount > 0 {
            self.ledger.account(resource, amount);
        }
    }

    /// Uncapped accounting, straight to the ledger.
    pub fn account(&mut self, resource: K, delta: i64) {
        self.ledger.account(resource, delta);
    }

    /// The underlying ledger.
    #[must_use]
    pub fn ledger(&self) -> &ResourceLedger<K> {
        &self.ledger
    }

    /// Empties the pool.
    pub fn reset(&mut self) {
        self.ledger.clear();
    }

    /// True if every slot can take `quantity` at once. Ledger unchanged.
    pub fn can_satisfy<S: Slot<K>>(&mut self, slots: &[S], quantity: i64) -> bool {
        MatchEngine::new(&mut self.ledger, slots).try_pick(quantity)
    }

    /// [`can_satisfy`](Self::can_satisfy), reporting `(slot_index, type)` per
    /// slot on success. Ledger unchanged.
    pub fn can_satisfy_with<S, F>(&mut self, slots: &[S], quantity: i64, report: F) -> bool
    where
        S: Slot<K>,
        F: FnMut(usize, &K),
    {
        MatchEngine::new(&mut self.ledger, slots).try_pick_with(quantity, report)
    }

    /// Necessary bound on any feasible batch for `slots`.
    #[must_use]
    pub fn upper_bound<S: Slot<K>>(&self, slots: &[S]) -> i64 {
        CompatibilityGraph::build(&self.ledger, slots).upper_bound(&self.ledger)
    }

    /// Largest uniform batch in `0..=hard_cap` the pool can fill. Ledger unchanged.
    pub fn largest_satisfiable_batch<S: Slot<K>>(&mut self, slots: &[S], hard_cap: i64) -> i64 {
        BatchSolver::for_request(&mut self.ledger, slots).max_feasible_quantity(hard_cap)
    }

    /// [`largest_satisfiable_batch`](Self::largest_satisfiable_batch), reporting
    /// the winning assignment when the batch is positive. Ledger unchanged.
    pub fn largest_satisfiable_batch_with<S, F>(
        &mut self,
        slots: &[S],
        hard_cap: i64,
        report: F,
    ) -> i64
    where
        S: Slot<K>,
        F: FnMut(usize, &K),
    {
        BatchSolver::for_request(&mut self.ledger, slots).max_feasible_quantity_with(hard_cap, report)
    }

    /// Matches `slots` at `quantity` and permanently debits the assignment.
    ///
    /// Returns the resource type used by each slot, in slot order, or `None`
    /// (ledger untouched) if the request is infeasible. `quantity <= 0`
    /// succeeds without spending anything and returns an empty assignment.
    pub fn consume<S: Slot<K>>(&mut self, slots: &[S], quantity: i64) -> Option<Vec<K>> {
        if quantity <= 0 {
            return Some(Vec::new());
        }
        let mut picked: Vec<Option<K>> = vec![None; slots.len()];
        let feasible = self.can_satisfy_with(slots, quantity, |slot, resource| {
            picked[slot] = Some(resource.clone());
        });
        if !feasible {
            return None;
        }
        let assignment: Vec<K> = picked.into_iter().flatten().collect();
        self.commit(&assignment, quantity);
        Some(assignment)
    }

    /// Finds the largest batch up to `hard_cap` and permanently debits it.
    ///
    /// Returns the batch and the per-slot assignment; `(0, [])` when nothing fits.
    pub fn consume_largest<S: Slot<K>>(&mut self, slots: &[S], hard_cap: i64) -> (i64, Vec<K>) {
        let mut picked: Vec<Option<K>> = vec![None; slots.len()];
        let batch = self.largest_satisfiable_batch_with(slots, hard_cap, |slot, resource| {
            picked[slot] = Some(resource.clone());
        });
        if batch <= 0 || slots.is_empty() {
            return (batch.max(0), Vec::new());
        }
        let assignment: Vec<K> = picked.into_iter().flatten().collect();
        self.commit(&assignment, batch);
        (batch, assignment)
    }

    fn commit(&mut self, assignment: &[K], quantity: i64) {
        for resource in assignment {
            // The match just proved this fits; an overdraft is a bug.
            self.ledger.debit(resource, quantity);
        }
    }
}
