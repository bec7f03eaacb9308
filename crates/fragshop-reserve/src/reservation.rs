//! Lease acquisition and release.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, info};

use fragshop_ledger::LedgerStore;
use fragshop_types::{Account, BuyerId, FragshopError, Lease, Result};

/// Hands out exclusive account leases, one per buyer.
///
/// The affordability check here is advisory: it runs before the lease
/// attempt without holding any lock across both steps, so a buyer's balance
/// can change between check and reservation. That is acceptable because
/// settlement is the only debit path and it runs strictly after delivery;
/// the check merely keeps obviously-broke buyers from tying up stock.
#[derive(Clone)]
pub struct ReservationManager {
    store: LedgerStore,
}

impl ReservationManager {
    #[must_use]
    pub fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Reserve the oldest available account for `buyer`.
    ///
    /// # Errors
    /// - `InsufficientBalance` when the buyer cannot afford the current price
    /// - `AlreadyLeased` when the buyer already holds a lease
    /// - `NoStock` when the inventory has no available accounts
    pub fn reserve(&self, buyer: BuyerId) -> Result<Account> {
        let price = self.store.price();
        let available = self.store.balance(buyer);
        if available < price {
            debug!(%buyer, %available, %price, "reservation refused: insufficient balance");
            return Err(FragshopError::InsufficientBalance {
                needed: price,
                available,
            });
        }
        let account = self.store.reserve_account(buyer)?;
        info!(%buyer, account = %account.id, phone = %account.phone, "account reserved");
        Ok(account)
    }

    /// Return `buyer`'s leased account to stock. Safe to call on any
    /// terminal path; a missing lease is a no-op.
    pub fn release(&self, buyer: BuyerId) {
        self.store.release(buyer);
    }

    /// The buyer's active lease, if any.
    #[must_use]
    pub fn lease(&self, buyer: BuyerId) -> Option<Lease> {
        self.store.lease(buyer)
    }

    /// The account currently leased to `buyer`, if any.
    #[must_use]
    pub fn leased_account(&self, buyer: BuyerId) -> Option<Account> {
        self.store.leased_account(buyer)
    }

    /// How many more accounts `buyer` can afford at the current price.
    #[must_use]
    pub fn purchasing_power(&self, buyer: BuyerId) -> u64 {
        purchasing_power(self.store.balance(buyer), self.store.price())
    }
}

/// Whole accounts affordable at `price` with `balance`.
#[must_use]
pub fn purchasing_power(balance: Decimal, price: Decimal) -> u64 {
    if price <= Decimal::ZERO || balance < price {
        return 0;
    }
    (balance / price).trunc().to_u64().unwrap_or(u64::MAX)
}
