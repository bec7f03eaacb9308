//! # fragshop-types
//!
//! Shared types, errors, and collaborator interfaces for the **Fragshop**
//! credential-shop broker.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`BuyerId`], [`AccountId`], [`TxRecordId`], [`SessionId`], [`SenderId`]
//! - **Inventory model**: [`Account`], [`AccountStatus`], [`CredentialBundle`], [`Lease`]
//! - **User model**: [`User`], [`UserSummary`], [`Review`]
//! - **Ledger model**: [`TxRecord`], [`TxKind`], [`SettlementReceipt`]
//! - **Chain model**: [`ChainTransfer`]
//! - **Collaborator interfaces**: [`MessagingGateway`], [`SessionProvider`], [`ChainReader`]
//! - **Configuration**: [`ShopConfig`], [`CodePattern`]
//! - **Errors**: [`FragshopError`] with `FS_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults
//!
//! The collaborator interfaces are the seams to the external systems the
//! broker talks to (messaging front end, login-code provider, payment-chain
//! reader). Mock implementations for tests live behind the `test-helpers`
//! feature.

pub mod account;
pub mod chain;
pub mod config;
pub mod constants;
pub mod error;
pub mod gateway;
pub mod ids;
pub mod lease;
pub mod review;
pub mod session;
pub mod transaction;
pub mod transfer;
pub mod user;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use account::*;
pub use chain::*;
pub use config::*;
pub use error::*;
pub use gateway::*;
pub use ids::*;
pub use lease::*;
pub use review::*;
pub use session::*;
pub use transaction::*;
pub use transfer::*;
pub use user::*;

// Constants are accessed via `fragshop_types::constants::FOO`
// (not re-exported to avoid name collisions).
