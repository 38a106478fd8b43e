//! # Ledger Error Types
//!
//! Errors returned by the *checked* ledger operations.
//!
//! Infeasible matches are not errors: the engine reports them as `false`/`0`.
//! An unchecked [`debit`](crate::ResourceLedger::debit) that would overdraw an
//! entry is an invariant violation and panics instead of returning one of these.

use thiserror::Error;

/// Errors that can occur when mutating a ledger through the checked API.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    /// Attempted to take more than the entry holds.
    #[error("ledger overdraft: requested {requested}, available {available}")]
    Overdraft {
        /// The amount requested.
        requested: i64,
        /// The amount on hand.
        available: i64,
    },

    /// Checked operations take non-negative amounts only.
    #[error("negative amount {0} passed to a checked ledger operation")]
    NegativeAmount(i64),

    /// Crediting would overflow the stored quantity.
    #[error("arithmetic overflow in ledger quantity")]
    ArithmeticOverflow,
}

/// Result type for checked ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
