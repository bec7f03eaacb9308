//! Purchase settlement.

use tracing::{info, warn};

use fragshop_ledger::LedgerStore;
use fragshop_types::{BuyerId, SettlementReceipt};

/// Finalizes delivered purchases.
///
/// Settlement runs only after the login code has been handed to the buyer;
/// nothing here re-checks the balance. The price charged is the price at
/// this instant, which may differ from the price shown at reservation time.
/// A balance can go negative if an admin raised the price mid-delivery;
/// that drift is bounded by the price change and accepted.
#[derive(Clone)]
pub struct Settlement {
    store: LedgerStore,
}

impl Settlement {
    #[must_use]
    pub fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Settle `buyer`'s in-flight purchase. Returns the receipt, or `None`
    /// when no lease exists (already settled or already released).
    pub fn settle(&self, buyer: BuyerId) -> Option<SettlementReceipt> {
        match self.store.finalize_purchase(buyer) {
            Some(receipt) => {
                info!(
                    %buyer,
                    account = %receipt.account_id,
                    price = %receipt.price,
                    new_balance = %receipt.new_balance,
                    "purchase settled"
                );
                Some(receipt)
            }
            None => {
                warn!(%buyer, "settle called without an active lease");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fragshop_types::{AccountStatus, BuyerId, CredentialBundle, TxKind};
    use rust_decimal::Decimal;

    fn funded_reserved(buyer: BuyerId) -> (Settlement, LedgerStore) {
        let store = LedgerStore::new();
        store.save_account("+14155552671", CredentialBundle::new("sess", None));
        store.adjust_balance(buyer, Decimal::ONE).unwrap();
        store.reserve_account(buyer).unwrap();
        (Settlement::new(store.clone()), store)
    }

    #[test]
    fn settle_debits_and_journals() {
        let buyer = BuyerId(5);
        let (settlement, store) = funded_reserved(buyer);

        let receipt = settlement.settle(buyer).unwrap();
        assert_eq!(receipt.price, Decimal::new(1, 1));
        assert_eq!(receipt.new_balance, Decimal::new(9, 1));
        assert_eq!(store.balance(buyer), Decimal::new(9, 1));

        let sold = store.account(receipt.account_id).unwrap();
        assert_eq!(sold.status, AccountStatus::Sold);
        assert_eq!(sold.buyer_id, Some(buyer));

        let journal = store.transactions_for(buyer);
        assert_eq!(journal.len(), 1);
        assert_eq!(journal[0].kind, TxKind::Purchase);
    }

    #[test]
    fn second_settle_is_noop() {
        let buyer = BuyerId(5);
        let (settlement, store) = funded_reserved(buyer);
        settlement.settle(buyer).unwrap();
        assert!(settlement.settle(buyer).is_none());
        // Only one debit applied.
        assert_eq!(store.balance(buyer), Decimal::new(9, 1));
        assert_eq!(store.transactions_for(buyer).len(), 1);
    }

    #[test]
    fn settle_without_lease_is_none() {
        let store = LedgerStore::new();
        let settlement = Settlement::new(store);
        assert!(settlement.settle(BuyerId(1)).is_none());
    }

    #[test]
    fn price_raised_mid_delivery_charges_new_price() {
        let buyer = BuyerId(5);
        let (settlement, store) = funded_reserved(buyer);
        store.set_price(Decimal::new(2, 0)).unwrap();

        let receipt = settlement.settle(buyer).unwrap();
        assert_eq!(receipt.price, Decimal::new(2, 0));
        // Balance drifts negative; accepted, never rolled back.
        assert_eq!(store.balance(buyer), Decimal::new(-1, 0));
    }
}
