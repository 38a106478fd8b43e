//! # Batch Solver
//!
//! Finds the largest uniform per-slot quantity for which a request is
//! feasible, by binary search over the match engine.
//!
//! Feasibility is monotone in the quantity: if `k` fits, so does every
//! `0 < k' < k`. The solver holds the ledger exclusively for its lifetime, so
//! nothing can break that between probes.

use std::hash::Hash;

use crate::engine::MatchEngine;
use crate::ledger::ResourceLedger;
use crate::slot::Slot;

/// Binary search for the maximum feasible batch size.
pub struct BatchSolver<'a, K> {
    engine: MatchEngine<'a, K>,
}

impl<'a, K: Clone + Eq + Hash> BatchSolver<'a, K> {
    /// Wraps an engine already bound to a request.
    #[must_use]
    pub fn new(engine: MatchEngine<'a, K>) -> Self {
        Self { engine }
    }

    /// Builds the engine for `slots` and wraps it.
    #[must_use]
    pub fn for_request<S: Slot<K>>(ledger: &'a mut ResourceLedger<K>, slots: &[S]) -> Self {
        Self::new(MatchEngine::new(ledger, slots))
    }

    /// Cheap necessary bound: min over slots of the best compatible quantity.
    ///
    /// `i64::MAX` for an empty request, `0` if any slot has nothing compatible.
    #[must_use]
    pub fn upper_bound(&self) -> i64 {
        self.engine.graph().upper_bound(self.engine.ledger())
    }

    /// Largest `k` in `0..=min(hard_cap, upper_bound)` for which the request is
    /// feasible. `0` means nothing positive fits.
    pub fn max_feasible_quantity(&mut self, hard_cap: i64) -> i64 {
        self.search(hard_cap)
    }

    /// Like [`max_feasible_quantity`](Self::max_feasible_quantity), then reports
    /// the winning assignment `(slot_index, resource_type)` once per slot when
    /// the result is positive.
    pub fn max_feasible_quantity_with<F>(&mut self, hard_cap: i64, report: F) -> i64
    where
        F: FnMut(usize, &K),
    {
        let best = self.search(hard_cap);
        if best > 0 && self.engine.graph().slot_count() > 0 {
            let confirmed = self.engine.try_pick_with(best, report);
            debug_assert!(confirmed, "feasibility oracle is not monotone");
        }
        best
    }

    fn search(&mut self, hard_cap: i64) -> i64 {
        let bound = hard_cap.min(self.upper_bound()).max(0);
        tracing::debug!(
            "batch search: hard_cap={}, bound={}, slots={}",
            hard_cap,
            bound,
            self.engine.graph().slot_count()
        );
        if self.engine.graph().slot_count() == 0 {
            return bound;
        }

        if bound == 0 || self.engine.try_pick(bound) {
            tracing::debug!("batch search settled on bound {}", bound);
            return bound;
        }

        // Invariant: `low` is feasible, `high` is not.
        let mut low = 0i64;
        let mut high = bound;
        while high - low > 1 {
            let mid = low + (high - low) / 2;
            if self.engine.try_pick(mid) {
                low = mid;
            } else {
                high = mid;
            }
        }

        tracing::debug!("batch search settled on {}", low);
        low
    }
}
