//! # Slotforge Core
//!
//! Capacity-constrained resource-to-slot matching.
//!
//! Given a pool of countable, typed resources and a list of slots that each
//! accept some subset of resource types, the engine answers:
//!
//! 1. **Can every slot be filled at once** with a uniform per-slot quantity,
//!    without spending any resource type twice?
//! 2. **What is the largest such quantity** (the batch size)?
//!
//! ## Design Principles
//!
//! 1. **One instance per pool** - no process-wide state
//! 2. **Single-threaded** - `&mut` APIs; callers serialize access
//! 3. **Infeasibility is a value** - `false` / `0`, never an error
//! 4. **Overdraft is a bug** - an unchecked debit past zero panics
//!
//! ## Example
//!
//! ```rust
//! use slotforge_core::{AnyOf, ResourceAccountingFacade};
//!
//! let mut pool = ResourceAccountingFacade::new();
//! pool.account("wood", 1);
//! pool.account("stone", 1);
//!
//! // Slot 0 takes either; slot 1 needs stone. The engine routes wood to slot 0.
//! let slots = [AnyOf::new(["wood", "stone"]), AnyOf::single("stone")];
//! let mut used = Vec::new();
//! assert!(pool.can_satisfy_with(&slots, 1, |_, kind| used.push(*kind)));
//! assert_eq!(used, ["wood", "stone"]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bitset;
pub mod engine;
pub mod error;
pub mod facade;
pub mod graph;
pub mod ledger;
pub mod slot;
pub mod solver;

pub use bitset::BitPlane;
pub use engine::MatchEngine;
pub use error::{LedgerError, LedgerResult};
pub use facade::ResourceAccountingFacade;
pub use graph::CompatibilityGraph;
pub use ledger::ResourceLedger;
pub use slot::{AnyOf, Slot};
pub use solver::BatchSolver;
