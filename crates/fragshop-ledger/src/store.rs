//! The in-memory ledger store.
//!
//! All tables live behind one mutex; each public method takes the lock once,
//! so every operation is atomic with respect to all others — the stand-in
//! for a durable store's single-statement atomicity. Default unit price is
//! 0.1 TON until an admin changes it.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

use fragshop_types::{
    Account, AccountId, AccountStatus, BuyerId, CredentialBundle, FragshopError, Lease,
    Result, Review, SettlementReceipt, TxKind, TxRecord, User, UserSummary,
    purchase_external_id,
};

#[derive(Debug)]
struct Tables {
    users: HashMap<BuyerId, User>,
    /// Keyed by id; BTreeMap iteration order is insertion (FIFO) order.
    accounts: BTreeMap<AccountId, Account>,
    /// Keyed by buyer id — the primary key that caps in-flight purchases
    /// at one per buyer.
    leases: HashMap<BuyerId, Lease>,
    transactions: Vec<TxRecord>,
    /// Unique index over transaction external ids.
    external_ids: HashSet<String>,
    /// Keyed by user id — one review per user.
    reviews: HashMap<BuyerId, Review>,
    price: Decimal,
    next_account_id: AccountId,
}

/// Handle to the ledger store. Cheap to clone; all clones share the tables.
#[derive(Clone)]
pub struct LedgerStore {
    inner: Arc<Mutex<Tables>>,
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore {
    /// Empty store with the default unit price (0.1 TON).
    #[must_use]
    pub fn new() -> Self {
        Self::with_price(Decimal::new(1, 1))
    }

    /// Empty store with the given unit price.
    #[must_use]
    pub fn with_price(price: Decimal) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Tables {
                users: HashMap::new(),
                accounts: BTreeMap::new(),
                leases: HashMap::new(),
                transactions: Vec::new(),
                external_ids: HashSet::new(),
                reviews: HashMap::new(),
                price,
                next_account_id: AccountId(1),
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.inner.lock().expect("ledger mutex poisoned")
    }

    // =========================================================================
    // User Operations
    // =========================================================================

    /// Register a user if not already known. Existing rows are untouched.
    pub fn upsert_user(&self, buyer: BuyerId, handle: &str) {
        let mut t = self.lock();
        t.users.entry(buyer).or_insert_with(|| User::new(buyer, handle));
    }

    #[must_use]
    pub fn user(&self, buyer: BuyerId) -> Option<User> {
        self.lock().users.get(&buyer).cloned()
    }

    /// Spendable balance; zero for unknown users.
    #[must_use]
    pub fn balance(&self, buyer: BuyerId) -> Decimal {
        self.lock()
            .users
            .get(&buyer)
            .map_or(Decimal::ZERO, |u| u.balance)
    }

    /// Credit a user's balance (admin credit / review reward). Creates the
    /// user row if absent so attributable funds are never dropped.
    ///
    /// # Errors
    /// Returns `InvalidAmount` when `amount` is not positive.
    pub fn adjust_balance(&self, buyer: BuyerId, amount: Decimal) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(FragshopError::InvalidAmount(amount));
        }
        let mut t = self.lock();
        let user = t.users.entry(buyer).or_insert_with(|| User::new(buyer, ""));
        user.balance += amount;
        Ok(user.balance)
    }

    #[must_use]
    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    /// Per-user roll-up (balance + purchase count) for admin reporting.
    #[must_use]
    pub fn user_summaries(&self) -> Vec<UserSummary> {
        let t = self.lock();
        t.users
            .values()
            .map(|u| UserSummary {
                id: u.id,
                handle: u.handle.clone(),
                balance: u.balance,
                purchases: t
                    .accounts
                    .values()
                    .filter(|a| a.buyer_id == Some(u.id))
                    .count(),
            })
            .collect()
    }

    // =========================================================================
    // Account / Stock Operations
    // =========================================================================

    /// Add an account to stock, or refresh it when the phone already exists.
    /// A refresh replaces the credentials and resets the account to
    /// Available, clearing any previous sale.
    pub fn save_account(&self, phone: &str, credentials: CredentialBundle) -> AccountId {
        let mut t = self.lock();
        if let Some(existing) = t.accounts.values_mut().find(|a| a.phone == phone) {
            existing.credentials = credentials;
            existing.status = AccountStatus::Available;
            existing.added_at = Utc::now();
            existing.sold_at = None;
            existing.buyer_id = None;
            debug!(account = %existing.id, %phone, "account refreshed");
            return existing.id;
        }
        let id = t.next_account_id;
        t.next_account_id = id.next();
        t.accounts.insert(id, Account::new(id, phone, credentials));
        debug!(account = %id, %phone, "account added to stock");
        id
    }

    #[must_use]
    pub fn account(&self, id: AccountId) -> Option<Account> {
        self.lock().accounts.get(&id).cloned()
    }

    #[must_use]
    pub fn available_count(&self) -> usize {
        self.lock()
            .accounts
            .values()
            .filter(|a| a.status == AccountStatus::Available)
            .count()
    }

    #[must_use]
    pub fn sold_count(&self) -> usize {
        self.lock()
            .accounts
            .values()
            .filter(|a| a.status == AccountStatus::Sold)
            .count()
    }

    /// Available accounts, oldest first.
    #[must_use]
    pub fn available_accounts(&self) -> Vec<Account> {
        self.lock()
            .accounts
            .values()
            .filter(|a| a.status == AccountStatus::Available)
            .cloned()
            .collect()
    }

    /// Permanently remove an account, only while it is still in stock.
    ///
    /// # Errors
    /// Returns `AccountNotFound` when the account is missing or not
    /// Available (reserved and sold accounts are never deleted).
    pub fn delete_available(&self, id: AccountId) -> Result<()> {
        let mut t = self.lock();
        match t.accounts.get(&id) {
            Some(a) if a.status == AccountStatus::Available => {
                t.accounts.remove(&id);
                Ok(())
            }
            _ => Err(FragshopError::AccountNotFound(id)),
        }
    }

    /// Accounts sold to this buyer, most recent sale first.
    #[must_use]
    pub fn purchases_of(&self, buyer: BuyerId) -> Vec<Account> {
        let mut sold: Vec<Account> = self
            .lock()
            .accounts
            .values()
            .filter(|a| a.buyer_id == Some(buyer))
            .cloned()
            .collect();
        sold.sort_by(|a, b| b.sold_at.cmp(&a.sold_at));
        sold
    }

    // =========================================================================
    // Reservation Primitives
    // =========================================================================

    /// Atomically lease the oldest available account to `buyer`.
    ///
    /// The lease table's buyer-id key is what enforces "at most one
    /// in-flight purchase per buyer" — including under concurrent calls.
    ///
    /// # Errors
    /// - `AlreadyLeased` when a lease row exists for this buyer
    /// - `NoStock` when no account is Available
    pub fn reserve_account(&self, buyer: BuyerId) -> Result<Account> {
        let mut t = self.lock();
        if t.leases.contains_key(&buyer) {
            return Err(FragshopError::AlreadyLeased(buyer));
        }
        // BTreeMap order: smallest id first (FIFO fairness).
        let id = t
            .accounts
            .values()
            .find(|a| a.status == AccountStatus::Available)
            .map(|a| a.id)
            .ok_or(FragshopError::NoStock)?;

        let account = t.accounts.get_mut(&id).expect("account exists");
        account.status = AccountStatus::Reserved;
        let snapshot = account.clone();
        t.leases.insert(buyer, Lease::new(buyer, id));
        debug!(%buyer, account = %id, "account reserved");
        Ok(snapshot)
    }

    /// Release a buyer's lease, returning the account to stock. Idempotent:
    /// no lease is a no-op, not an error.
    pub fn release(&self, buyer: BuyerId) {
        let mut t = self.lock();
        if let Some(lease) = t.leases.remove(&buyer) {
            if let Some(account) = t.accounts.get_mut(&lease.account_id) {
                if account.status == AccountStatus::Reserved {
                    account.status = AccountStatus::Available;
                }
            }
            debug!(%buyer, account = %lease.account_id, "lease released");
        }
    }

    /// The account currently leased to `buyer`, if any. Read-only; used by
    /// the delivery coordinator to recover credentials.
    #[must_use]
    pub fn leased_account(&self, buyer: BuyerId) -> Option<Account> {
        let t = self.lock();
        let lease = t.leases.get(&buyer)?;
        t.accounts.get(&lease.account_id).cloned()
    }

    /// The lease row itself (for the `reserved_at` deadline anchor).
    #[must_use]
    pub fn lease(&self, buyer: BuyerId) -> Option<Lease> {
        self.lock().leases.get(&buyer).copied()
    }

    // =========================================================================
    // Settlement Primitive
    // =========================================================================

    /// Debit the buyer, mark the leased account sold, journal the purchase,
    /// and delete the lease — as one atomic step. The price is read *now*,
    /// not at reservation time.
    ///
    /// Returns `None` when no lease exists (duplicate invocation is a
    /// defensive no-op).
    pub fn finalize_purchase(&self, buyer: BuyerId) -> Option<SettlementReceipt> {
        let mut t = self.lock();
        let lease = t.leases.remove(&buyer)?;
        let price = t.price;
        let now = Utc::now();

        let user = t.users.entry(buyer).or_insert_with(|| User::new(buyer, ""));
        user.balance -= price;
        let new_balance = user.balance;

        let account = t
            .accounts
            .get_mut(&lease.account_id)
            .expect("leased account exists");
        account.status = AccountStatus::Sold;
        account.buyer_id = Some(buyer);
        account.sold_at = Some(now);
        let phone = account.phone.clone();

        let external_id = purchase_external_id(lease.account_id, buyer);
        t.external_ids.insert(external_id.clone());
        t.transactions
            .push(TxRecord::new(buyer, price, external_id, TxKind::Purchase));

        debug!(%buyer, account = %lease.account_id, %price, "purchase settled");
        Some(SettlementReceipt {
            buyer_id: buyer,
            account_id: lease.account_id,
            phone,
            price,
            new_balance,
            settled_at: now,
        })
    }

    // =========================================================================
    // Deposit Operations
    // =========================================================================

    /// Journal a deposit and credit the buyer, atomically. The unique index
    /// on the external id is the sole at-most-once guarantee for crediting.
    ///
    /// Returns the new balance.
    ///
    /// # Errors
    /// - `NonPositiveAmount` when `amount` is not positive
    /// - `DuplicateDeposit` when a row with this hash already exists
    pub fn record_deposit(
        &self,
        buyer: BuyerId,
        amount: Decimal,
        tx_hash: &str,
    ) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(FragshopError::NonPositiveAmount);
        }
        let mut t = self.lock();
        if !t.external_ids.insert(tx_hash.to_string()) {
            return Err(FragshopError::DuplicateDeposit {
                tx_hash: tx_hash.to_string(),
            });
        }
        t.transactions.push(TxRecord::new(
            buyer,
            amount,
            tx_hash.to_string(),
            TxKind::Deposit,
        ));
        let user = t.users.entry(buyer).or_insert_with(|| User::new(buyer, ""));
        user.balance += amount;
        Ok(user.balance)
    }

    /// Sum of all deposit amounts.
    #[must_use]
    pub fn total_revenue(&self) -> Decimal {
        self.lock()
            .transactions
            .iter()
            .filter(|tx| tx.kind == TxKind::Deposit)
            .map(|tx| tx.amount)
            .sum()
    }

    /// All journal rows for a user, oldest first.
    #[must_use]
    pub fn transactions_for(&self, buyer: BuyerId) -> Vec<TxRecord> {
        self.lock()
            .transactions
            .iter()
            .filter(|tx| tx.user_id == buyer)
            .cloned()
            .collect()
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Current unit price.
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.lock().price
    }

    /// Update the unit price.
    ///
    /// # Errors
    /// Returns `InvalidPrice` when `price` is not positive.
    pub fn set_price(&self, price: Decimal) -> Result<()> {
        if price <= Decimal::ZERO {
            return Err(FragshopError::InvalidPrice(price));
        }
        self.lock().price = price;
        Ok(())
    }

    // =========================================================================
    // Review Operations
    // =========================================================================

    /// Save a review. One review per user.
    ///
    /// # Errors
    /// - `InvalidRating` when `rating` is outside 1..=5
    /// - `AlreadyReviewed` when the user already has one
    pub fn save_review(
        &self,
        buyer: BuyerId,
        handle: &str,
        rating: u8,
        text: &str,
    ) -> Result<()> {
        if !(1..=5).contains(&rating) {
            return Err(FragshopError::InvalidRating(rating));
        }
        let mut t = self.lock();
        if t.reviews.contains_key(&buyer) {
            return Err(FragshopError::AlreadyReviewed(buyer));
        }
        t.reviews.insert(buyer, Review::new(buyer, handle, rating, text));
        Ok(())
    }

    #[must_use]
    pub fn has_reviewed(&self, buyer: BuyerId) -> bool {
        self.lock().reviews.contains_key(&buyer)
    }

    /// Flag a review as rewarded. Returns whether a review existed.
    pub fn mark_review_rewarded(&self, buyer: BuyerId) -> bool {
        let mut t = self.lock();
        match t.reviews.get_mut(&buyer) {
            Some(review) => {
                review.rewarded = true;
                true
            }
            None => false,
        }
    }

    /// All reviews, most recent first.
    #[must_use]
    pub fn reviews(&self) -> Vec<Review> {
        let mut all: Vec<Review> = self.lock().reviews.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> CredentialBundle {
        CredentialBundle::new("sess", None)
    }

    fn stocked_store(phones: &[&str]) -> LedgerStore {
        let store = LedgerStore::new();
        for phone in phones {
            store.save_account(phone, creds());
        }
        store
    }

    #[test]
    fn upsert_user_ignores_existing() {
        let store = LedgerStore::new();
        store.upsert_user(BuyerId(1), "alice");
        store.adjust_balance(BuyerId(1), Decimal::ONE).unwrap();
        store.upsert_user(BuyerId(1), "renamed");
        let user = store.user(BuyerId(1)).unwrap();
        assert_eq!(user.handle, "alice");
        assert_eq!(user.balance, Decimal::ONE);
    }

    #[test]
    fn balance_of_unknown_user_is_zero() {
        let store = LedgerStore::new();
        assert_eq!(store.balance(BuyerId(404)), Decimal::ZERO);
    }

    #[test]
    fn adjust_balance_rejects_non_positive() {
        let store = LedgerStore::new();
        let err = store.adjust_balance(BuyerId(1), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, FragshopError::InvalidAmount(_)));
    }

    #[test]
    fn reserve_picks_oldest_available() {
        let store = stocked_store(&["+1", "+2", "+3"]);
        let account = store.reserve_account(BuyerId(9)).unwrap();
        assert_eq!(account.phone, "+1");
        assert_eq!(account.status, AccountStatus::Reserved);
    }

    #[test]
    fn reserve_skips_reserved_and_sold() {
        let store = stocked_store(&["+1", "+2"]);
        store.reserve_account(BuyerId(1)).unwrap();
        let second = store.reserve_account(BuyerId(2)).unwrap();
        assert_eq!(second.phone, "+2");
    }

    #[test]
    fn second_reserve_for_same_buyer_rejected() {
        let store = stocked_store(&["+1", "+2"]);
        store.reserve_account(BuyerId(1)).unwrap();
        let err = store.reserve_account(BuyerId(1)).unwrap_err();
        assert!(matches!(err, FragshopError::AlreadyLeased(BuyerId(1))));
    }

    #[test]
    fn empty_stock_is_no_stock() {
        let store = LedgerStore::new();
        let err = store.reserve_account(BuyerId(1)).unwrap_err();
        assert!(matches!(err, FragshopError::NoStock));
    }

    #[test]
    fn release_returns_account_to_stock() {
        let store = stocked_store(&["+1"]);
        store.reserve_account(BuyerId(1)).unwrap();
        assert_eq!(store.available_count(), 0);
        store.release(BuyerId(1));
        assert_eq!(store.available_count(), 1);
        assert!(store.lease(BuyerId(1)).is_none());
    }

    #[test]
    fn release_without_lease_is_noop() {
        let store = stocked_store(&["+1"]);
        store.release(BuyerId(42));
        assert_eq!(store.available_count(), 1);
    }

    #[test]
    fn leased_account_recovers_credentials() {
        let store = LedgerStore::new();
        store.save_account("+1", CredentialBundle::new("token-a", Some("pw".into())));
        store.reserve_account(BuyerId(7)).unwrap();
        let leased = store.leased_account(BuyerId(7)).unwrap();
        assert_eq!(leased.credentials.session_token, "token-a");
        assert_eq!(leased.credentials.secondary_password.as_deref(), Some("pw"));
        assert!(store.leased_account(BuyerId(8)).is_none());
    }

    #[test]
    fn finalize_debits_and_marks_sold() {
        let store = stocked_store(&["+1"]);
        store.upsert_user(BuyerId(123), "alice");
        store.adjust_balance(BuyerId(123), Decimal::ONE).unwrap();
        let account = store.reserve_account(BuyerId(123)).unwrap();

        let receipt = store.finalize_purchase(BuyerId(123)).unwrap();
        assert_eq!(receipt.price, Decimal::new(1, 1));
        assert_eq!(receipt.new_balance, Decimal::new(9, 1));
        assert_eq!(store.balance(BuyerId(123)), Decimal::new(9, 1));

        let sold = store.account(account.id).unwrap();
        assert_eq!(sold.status, AccountStatus::Sold);
        assert_eq!(sold.buyer_id, Some(BuyerId(123)));
        assert!(sold.sold_at.is_some());
        assert!(store.lease(BuyerId(123)).is_none());

        let journal = store.transactions_for(BuyerId(123));
        assert_eq!(journal.len(), 1);
        assert_eq!(journal[0].kind, TxKind::Purchase);
        assert_eq!(journal[0].external_id, format!("purchase_{}_123", account.id.0));
    }

    #[test]
    fn finalize_without_lease_is_none() {
        let store = stocked_store(&["+1"]);
        assert!(store.finalize_purchase(BuyerId(1)).is_none());
        assert_eq!(store.available_count(), 1);
    }

    #[test]
    fn finalize_reads_price_at_settlement_time() {
        let store = stocked_store(&["+1"]);
        store.adjust_balance(BuyerId(1), Decimal::ONE).unwrap();
        store.reserve_account(BuyerId(1)).unwrap();
        store.set_price(Decimal::new(5, 1)).unwrap();
        let receipt = store.finalize_purchase(BuyerId(1)).unwrap();
        assert_eq!(receipt.price, Decimal::new(5, 1));
        assert_eq!(store.balance(BuyerId(1)), Decimal::new(5, 1));
    }

    #[test]
    fn record_deposit_credits_once() {
        let store = LedgerStore::new();
        let amount = Decimal::new(15, 1);
        let balance = store.record_deposit(BuyerId(5), amount, "hash-1").unwrap();
        assert_eq!(balance, amount);

        let err = store.record_deposit(BuyerId(5), amount, "hash-1").unwrap_err();
        assert!(matches!(err, FragshopError::DuplicateDeposit { .. }));
        assert_eq!(store.balance(BuyerId(5)), amount);
    }

    #[test]
    fn record_deposit_creates_user_row() {
        let store = LedgerStore::new();
        store
            .record_deposit(BuyerId(77), Decimal::ONE, "hash-x")
            .unwrap();
        assert!(store.user(BuyerId(77)).is_some());
    }

    #[test]
    fn record_deposit_rejects_non_positive() {
        let store = LedgerStore::new();
        let err = store
            .record_deposit(BuyerId(1), Decimal::ZERO, "hash-z")
            .unwrap_err();
        assert!(matches!(err, FragshopError::NonPositiveAmount));
        // The hash was not consumed by the failed attempt.
        store
            .record_deposit(BuyerId(1), Decimal::ONE, "hash-z")
            .unwrap();
    }

    #[test]
    fn revenue_sums_deposits_only() {
        let store = stocked_store(&["+1"]);
        store.record_deposit(BuyerId(1), Decimal::ONE, "h1").unwrap();
        store.record_deposit(BuyerId(2), Decimal::new(5, 1), "h2").unwrap();
        store.reserve_account(BuyerId(1)).unwrap();
        store.finalize_purchase(BuyerId(1)).unwrap();
        assert_eq!(store.total_revenue(), Decimal::new(15, 1));
    }

    #[test]
    fn save_account_upsert_resets_sold_phone() {
        let store = stocked_store(&["+1"]);
        store.adjust_balance(BuyerId(1), Decimal::ONE).unwrap();
        store.reserve_account(BuyerId(1)).unwrap();
        store.finalize_purchase(BuyerId(1)).unwrap();
        assert_eq!(store.sold_count(), 1);

        let id = store.save_account("+1", CredentialBundle::new("fresh", None));
        let account = store.account(id).unwrap();
        assert_eq!(account.status, AccountStatus::Available);
        assert!(account.buyer_id.is_none());
        assert!(account.sold_at.is_none());
        assert_eq!(account.credentials.session_token, "fresh");
        assert_eq!(store.sold_count(), 0);
    }

    #[test]
    fn delete_available_only() {
        let store = stocked_store(&["+1", "+2"]);
        let reserved = store.reserve_account(BuyerId(1)).unwrap();
        let err = store.delete_available(reserved.id).unwrap_err();
        assert!(matches!(err, FragshopError::AccountNotFound(_)));

        let other = store.available_accounts()[0].id;
        store.delete_available(other).unwrap();
        assert_eq!(store.available_count(), 0);
    }

    #[test]
    fn purchases_of_orders_recent_first() {
        let store = stocked_store(&["+1", "+2"]);
        store.adjust_balance(BuyerId(1), Decimal::ONE).unwrap();
        store.reserve_account(BuyerId(1)).unwrap();
        store.finalize_purchase(BuyerId(1)).unwrap();
        store.reserve_account(BuyerId(1)).unwrap();
        store.finalize_purchase(BuyerId(1)).unwrap();

        let purchases = store.purchases_of(BuyerId(1));
        assert_eq!(purchases.len(), 2);
        assert!(purchases[0].sold_at >= purchases[1].sold_at);
    }

    #[test]
    fn set_price_rejects_non_positive() {
        let store = LedgerStore::new();
        assert!(store.set_price(Decimal::ZERO).is_err());
        assert!(store.set_price(Decimal::new(-1, 0)).is_err());
        store.set_price(Decimal::new(25, 2)).unwrap();
        assert_eq!(store.price(), Decimal::new(25, 2));
    }

    #[test]
    fn one_review_per_user() {
        let store = LedgerStore::new();
        store.save_review(BuyerId(1), "alice", 5, "great").unwrap();
        let err = store.save_review(BuyerId(1), "alice", 4, "again").unwrap_err();
        assert!(matches!(err, FragshopError::AlreadyReviewed(_)));
        assert!(store.has_reviewed(BuyerId(1)));
        assert!(!store.has_reviewed(BuyerId(2)));
    }

    #[test]
    fn review_rating_bounds() {
        let store = LedgerStore::new();
        assert!(matches!(
            store.save_review(BuyerId(1), "a", 0, "x").unwrap_err(),
            FragshopError::InvalidRating(0)
        ));
        assert!(matches!(
            store.save_review(BuyerId(1), "a", 6, "x").unwrap_err(),
            FragshopError::InvalidRating(6)
        ));
    }

    #[test]
    fn mark_review_rewarded_flags_existing() {
        let store = LedgerStore::new();
        assert!(!store.mark_review_rewarded(BuyerId(1)));
        store.save_review(BuyerId(1), "alice", 5, "great").unwrap();
        assert!(store.mark_review_rewarded(BuyerId(1)));
        assert!(store.reviews()[0].rewarded);
    }

    #[test]
    fn user_summaries_count_purchases() {
        let store = stocked_store(&["+1"]);
        store.upsert_user(BuyerId(1), "alice");
        store.adjust_balance(BuyerId(1), Decimal::ONE).unwrap();
        store.reserve_account(BuyerId(1)).unwrap();
        store.finalize_purchase(BuyerId(1)).unwrap();

        let summaries = store.user_summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].purchases, 1);
    }
}
