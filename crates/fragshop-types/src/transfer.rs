//! Inbound on-chain transfers as reported by the chain reader.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::BuyerId;

/// One inbound transfer to the shop's receiving address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainTransfer {
    /// Chain transaction hash — globally unique, the dedup key.
    pub tx_hash: String,
    /// Free-text memo; carries the paying buyer's id when well-formed.
    pub memo: Option<String>,
    /// Transferred amount in nano-TON minor units.
    pub amount_nano: u64,
}

impl ChainTransfer {
    #[must_use]
    pub fn new(tx_hash: impl Into<String>, memo: Option<String>, amount_nano: u64) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            memo,
            amount_nano,
        }
    }

    /// Parse the memo as a positive buyer id. `None` when the memo is
    /// missing, non-numeric, or not positive — such a deposit is
    /// unattributable and is skipped by the reconciler.
    #[must_use]
    pub fn memo_buyer_id(&self) -> Option<BuyerId> {
        let memo = self.memo.as_deref()?.trim();
        let id: i64 = memo.parse().ok()?;
        (id > 0).then_some(BuyerId(id))
    }

    /// Transferred amount in TON.
    #[must_use]
    pub fn amount_ton(&self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.amount_nano), 9)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memo_parses_positive_id() {
        let tx = ChainTransfer::new("h1", Some("123456".into()), 1);
        assert_eq!(tx.memo_buyer_id(), Some(BuyerId(123_456)));
    }

    #[test]
    fn memo_tolerates_whitespace() {
        let tx = ChainTransfer::new("h1", Some("  42 ".into()), 1);
        assert_eq!(tx.memo_buyer_id(), Some(BuyerId(42)));
    }

    #[test]
    fn non_numeric_memo_rejected() {
        let tx = ChainTransfer::new("h1", Some("thanks!".into()), 1);
        assert_eq!(tx.memo_buyer_id(), None);
    }

    #[test]
    fn missing_memo_rejected() {
        let tx = ChainTransfer::new("h1", None, 1);
        assert_eq!(tx.memo_buyer_id(), None);
    }

    #[test]
    fn non_positive_memo_rejected() {
        assert_eq!(
            ChainTransfer::new("h1", Some("0".into()), 1).memo_buyer_id(),
            None
        );
        assert_eq!(
            ChainTransfer::new("h1", Some("-5".into()), 1).memo_buyer_id(),
            None
        );
    }

    #[test]
    fn amount_converts_from_nano() {
        // 1.5 TON
        let tx = ChainTransfer::new("h1", None, 1_500_000_000);
        assert_eq!(tx.amount_ton(), Decimal::new(15, 1));
    }

    #[test]
    fn zero_amount_is_zero_ton() {
        let tx = ChainTransfer::new("h1", None, 0);
        assert_eq!(tx.amount_ton(), Decimal::ZERO);
    }
}
