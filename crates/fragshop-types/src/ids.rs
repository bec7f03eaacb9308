//! Identifiers used throughout Fragshop.
//!
//! Buyer and sender ids are the messaging platform's native integer ids.
//! Account ids are sequential so that "oldest first" reservation is a plain
//! ordering on the id. Ledger record ids use UUIDv7 for time-ordered sorting.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// BuyerId
// ---------------------------------------------------------------------------

/// A buyer's messaging-platform identifier (telegram-style integer id).
///
/// Doubles as the primary key of the lease table: at most one lease may
/// exist per buyer at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BuyerId(pub i64);

impl fmt::Display for BuyerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buyer:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// Sequential inventory identifier for a sellable account.
///
/// Assigned in insertion order by the ledger store; reservation picks the
/// available account with the smallest id (FIFO fairness).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl AccountId {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SenderId
// ---------------------------------------------------------------------------

/// Identifier of a message sender inside a provider session.
///
/// The login-code watcher only accepts messages from the provider's fixed
/// system sender (see [`crate::constants::CODE_SENDER_ID`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SenderId(pub i64);

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sender:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TxRecordId
// ---------------------------------------------------------------------------

/// Globally unique ledger-row identifier. Uses UUIDv7 for time-ordered sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TxRecordId(pub Uuid);

impl TxRecordId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TxRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TxRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SessionId
// ---------------------------------------------------------------------------

/// Opaque handle to an open provider session.
///
/// Minted by the [`crate::SessionProvider`] on `open_session` / `begin_login`
/// and valid until `close_session`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
