//! Append-only ledger rows and the settlement receipt.
//!
//! Every balance movement leaves a transaction row. The row's *external id*
//! is globally unique and is the sole deduplication mechanism for deposits:
//! a chain transfer's hash for deposits, a synthesized
//! `purchase_<account>_<buyer>` key for purchases.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, BuyerId, TxRecordId};

/// What kind of balance movement a ledger row records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxKind {
    /// On-chain deposit credited to a user.
    Deposit,
    /// Account purchase debited from a buyer at settlement.
    Purchase,
}

impl std::fmt::Display for TxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposit => write!(f, "deposit"),
            Self::Purchase => write!(f, "purchase"),
        }
    }
}

/// One append-only ledger row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxRecord {
    pub id: TxRecordId,
    pub user_id: BuyerId,
    pub amount: Decimal,
    /// Globally unique external identifier (chain hash or purchase key).
    pub external_id: String,
    pub kind: TxKind,
    pub created_at: DateTime<Utc>,
}

impl TxRecord {
    #[must_use]
    pub fn new(user_id: BuyerId, amount: Decimal, external_id: String, kind: TxKind) -> Self {
        Self {
            id: TxRecordId::new(),
            user_id,
            amount,
            external_id,
            kind,
            created_at: Utc::now(),
        }
    }
}

/// The synthesized external id for a purchase row.
#[must_use]
pub fn purchase_external_id(account: AccountId, buyer: BuyerId) -> String {
    format!("purchase_{}_{}", account.0, buyer.0)
}

/// What settlement produced, returned to the delivery coordinator so it can
/// tell the buyer exactly what was debited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub buyer_id: BuyerId,
    pub account_id: AccountId,
    pub phone: String,
    /// The unit price read at settlement time (not reservation time).
    pub price: Decimal,
    /// Balance after the debit.
    pub new_balance: Decimal,
    pub settled_at: DateTime<Utc>,
}
