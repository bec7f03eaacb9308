//! # fragshop-ledger
//!
//! The Ledger Store — the single source of truth for account status, lease
//! existence, balances, and the append-only transaction journal.
//!
//! ## Atomicity model
//!
//! The store guarantees atomic single-statement read-modify-write operations
//! and nothing more: no multi-statement distributed transactions. Every
//! public operation on [`LedgerStore`] either fully happens or leaves the
//! tables unchanged, and is serialized against all other operations. The
//! two correctness-critical uniqueness guarantees live here:
//!
//! - **at most one lease per buyer** — the lease table is keyed by buyer id;
//! - **at most one credit per transfer hash** — the transaction journal
//!   rejects duplicate external ids.
//!
//! Application code never relies on in-process locks of its own for these
//! properties; any in-memory cache elsewhere is an optimization that can be
//! re-derived from the store.

pub mod store;

pub use store::LedgerStore;
