//! Buyer / user model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::BuyerId;

/// A registered user of the shop.
///
/// The balance is TON-denominated and non-negative; it is mutated only by
/// settlement (debit) and by the deposit reconciler / admin credit (credit) —
/// never directly by UI code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Messaging-platform id (unique).
    pub id: BuyerId,
    /// Display handle, may be empty.
    pub handle: String,
    /// Spendable TON balance.
    pub balance: Decimal,
    /// When the user first appeared.
    pub joined_at: DateTime<Utc>,
}

impl User {
    /// A fresh user with zero balance.
    #[must_use]
    pub fn new(id: BuyerId, handle: impl Into<String>) -> Self {
        Self {
            id,
            handle: handle.into(),
            balance: Decimal::ZERO,
            joined_at: Utc::now(),
        }
    }
}

/// Per-user roll-up for admin reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: BuyerId,
    pub handle: String,
    pub balance: Decimal,
    /// Number of accounts this user has bought.
    pub purchases: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_has_zero_balance() {
        let user = User::new(BuyerId(42), "alice");
        assert_eq!(user.balance, Decimal::ZERO);
        assert_eq!(user.handle, "alice");
    }

    #[test]
    fn user_serde_roundtrip() {
        let user = User::new(BuyerId(42), "alice");
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(user.id, back.id);
        assert_eq!(user.balance, back.balance);
    }
}
