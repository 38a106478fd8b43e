//! # Resource Ledger
//!
//! Quantity-by-type accounting queried and mutated by the matching engine.
//!
//! Entries keep insertion order, so the item indices the engine derives from a
//! ledger (and therefore the assignments it reports) are deterministic for a
//! given sequence of `account` calls.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::error::{LedgerError, LedgerResult};

/// Mapping from resource type to available quantity.
///
/// Quantities are `>= 0` at rest. The engine may transiently debit entries
/// while it searches, but only after probing them with
/// [`has_at_least`](Self::has_at_least), and it restores them before returning.
///
/// # Thread Safety
///
/// Not synchronized. One ledger per resource pool; wrap in a mutex if it must
/// be shared.
#[derive(Clone, Debug)]
pub struct ResourceLedger<K> {
    entries: IndexMap<K, i64>,
}

impl<K> Default for ResourceLedger<K> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: Eq + Hash> ResourceLedger<K> {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta` to the stored quantity for `resource`, creating the entry
    /// if it is absent. Saturates instead of wrapping.
    pub fn account(&mut self, resource: K, delta: i64) {
        let entry = self.entries.entry(resource).or_insert(0);
        *entry = entry.saturating_add(delta);
    }

    /// Returns the stored quantity, `0` for unknown types.
    #[inline]
    #[must_use]
    pub fn quantity(&self, resource: &K) -> i64 {
        self.entries.get(resource).copied().unwrap_or(0)
    }

    /// True iff the stored quantity is at least `n`.
    #[inline]
    #[must_use]
    pub fn has_at_least(&self, resource: &K, n: i64) -> bool {
        self.quantity(resource) >= n
    }

    /// Subtracts `n` from `resource`.
    ///
    /// # Panics
    ///
    /// Panics if the entry would go negative. Debits are only issued after a
    /// successful [`has_at_least`](Self::has_at_least) probe in the same step,
    /// so an overdraft here means the caller's bookkeeping is broken.
    pub fn debit(&mut self, resource: &K, n: i64) {
        let available = self.quantity(resource);
        let remaining = available.checked_sub(n);
        assert!(
            matches!(remaining, Some(r) if r >= 0),
            "ledger overdraft: debit of {n} with only {available} available"
        );
        if let (Some(entry), Some(r)) = (self.entries.get_mut(resource), remaining) {
            *entry = r;
        }
    }

    /// Checked variant of [`debit`](Self::debit).
    ///
    /// # Errors
    ///
    /// - `NegativeAmount` if `n < 0`
    /// - `Overdraft` if fewer than `n` are available; the ledger is unchanged
    pub fn try_debit(&mut self, resource: &K, n: i64) -> LedgerResult<()> {
        if n < 0 {
            return Err(LedgerError::NegativeAmount(n));
        }
        let available = self.quantity(resource);
        if available < n {
            return Err(LedgerError::Overdraft {
                requested: n,
                available,
            });
        }
        if let Some(entry) = self.entries.get_mut(resource) {
            *entry -= n;
        }
        Ok(())
    }

    /// Adds `n` back to `resource`.
    ///
    /// # Errors
    ///
    /// - `NegativeAmount` if `n < 0`
    /// - `ArithmeticOverflow` if the entry would exceed `i64::MAX`
    pub fn credit(&mut self, resource: K, n: i64) -> LedgerResult<()> {
        if n < 0 {
            return Err(LedgerError::NegativeAmount(n));
        }
        let entry = self.entries.entry(resource).or_insert(0);
        *entry = entry
            .checked_add(n)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Empties the ledger.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of distinct resource types with an entry (zero quantities included).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no resource type has an entry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(type, quantity)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, i64)> {
        self.entries.iter().map(|(k, &q)| (k, q))
    }

    /// Sum of all quantities, saturating.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.entries
            .values()
            .fold(0i64, |acc, &q| acc.saturating_add(q))
    }
}
