//! # fragshop-settlement
//!
//! Money-movement services:
//!
//! - [`Settlement`] — finalizes a delivered purchase (debit, mark sold,
//!   journal, lease delete) in one store operation.
//! - [`DepositReconciler`] — polls the chain reader for inbound transfers
//!   and credits buyers by memo, exactly once per transfer hash.
//! - [`SeenCache`] — the reconciler's bounded skip-set of processed hashes.

pub mod reconciler;
pub mod seen_cache;
pub mod settle;

pub use reconciler::DepositReconciler;
pub use seen_cache::SeenCache;
pub use settle::Settlement;
