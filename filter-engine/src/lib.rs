//! # Scout Filter Engine
//!
//! Draft-state reconciliation for the influencer-discovery filter
//! panel. The engine lets a user accumulate many independent filter
//! edits across collapsible sections, keeps them uncommitted until an
//! explicit apply, and enforces platform-dependent constraints on every
//! edit.
//!
//! Core pieces:
//!
//! - [`SelectionLedger`] / [`WeightedSelection`]: working multi-select
//!   lists that *propose* complete slot values; they never touch the
//!   committed filter themselves.
//! - [`FilterDraftStore`]: the reconciliation engine, holding the
//!   last-committed filter set and a sparse pending overlay, with fresh
//!   per-read merge, human-readable active-filter descriptors, and
//!   explicit `apply` / `clear` / `remove_one` transitions.
//! - [`DeferredQueue`]: next-turn propagation with last-value-wins
//!   coalescing, so listeners never observe a half-applied update.
//!
//! The engine is UI-framework-agnostic; rendering, the results table
//! and server persistence are external collaborators.

mod backend;
mod error;
mod ledger;
mod propagation;
mod store;
mod weighted;

pub use backend::CommitBackend;
pub use backend::CommitError;
pub use error::FilterError;
pub use error::Result;
pub use ledger::SelectionLedger;
pub use propagation::DeferredQueue;
pub use store::ActiveFilter;
pub use store::ApplyOutcome;
pub use store::FilterDraftStore;
pub use store::SlotItem;
pub use weighted::WeightedEntry;
pub use weighted::WeightedSelection;
