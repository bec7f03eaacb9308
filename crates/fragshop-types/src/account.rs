//! Sellable account inventory model.
//!
//! An account moves through a three-state lifecycle:
//!
//! ```text
//!   ┌───────────┐  reserve   ┌──────────┐  settle   ┌──────┐
//!   │ AVAILABLE ├───────────▶│ RESERVED ├──────────▶│ SOLD │
//!   └───────────┘            └────┬─────┘           └──────┘
//!         ▲   release (cancel/timeout/failure)
//!         └───────┘
//! ```
//!
//! Invariants:
//! - `Reserved` ⇒ exactly one active lease references this account
//! - `Sold` ⇒ `buyer_id` and `sold_at` are set and no lease references it
//! - `Available` ⇒ no lease references it and `buyer_id` is unset

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, BuyerId};

/// Lifecycle state of a sellable account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    /// In stock, eligible for reservation.
    Available,
    /// Exclusively leased to one buyer for an in-flight purchase.
    Reserved,
    /// Delivered and settled. Terminal.
    Sold,
}

impl AccountStatus {
    /// Can this account transition to the given target state?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Available, Self::Reserved)
                | (Self::Reserved, Self::Sold | Self::Available)
        )
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "AVAILABLE"),
            Self::Reserved => write!(f, "RESERVED"),
            Self::Sold => write!(f, "SOLD"),
        }
    }
}

/// The secrets needed to open a provider session on a sold account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBundle {
    /// Serialized provider session.
    pub session_token: String,
    /// Secondary (2FA) password, when the account has one.
    pub secondary_password: Option<String>,
}

impl CredentialBundle {
    #[must_use]
    pub fn new(session_token: impl Into<String>, secondary_password: Option<String>) -> Self {
        Self {
            session_token: session_token.into(),
            secondary_password,
        }
    }
}

/// A pre-provisioned account in the shop's inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Sequential inventory id (insertion order).
    pub id: AccountId,
    /// Phone number / handle, unique across the inventory.
    pub phone: String,
    /// Credentials for opening a session on this account.
    pub credentials: CredentialBundle,
    /// Current lifecycle state.
    pub status: AccountStatus,
    /// When the account was added to stock.
    pub added_at: DateTime<Utc>,
    /// When the account was sold. `None` until settlement.
    pub sold_at: Option<DateTime<Utc>>,
    /// The buyer that bought it. `None` until settlement.
    pub buyer_id: Option<BuyerId>,
}

impl Account {
    /// A fresh in-stock account.
    #[must_use]
    pub fn new(id: AccountId, phone: impl Into<String>, credentials: CredentialBundle) -> Self {
        Self {
            id,
            phone: phone.into(),
            credentials,
            status: AccountStatus::Available,
            added_at: Utc::now(),
            sold_at: None,
            buyer_id: None,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == AccountStatus::Available
    }
}
