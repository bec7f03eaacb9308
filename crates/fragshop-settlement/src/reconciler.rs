//! Deposit reconciliation loop.
//!
//! Polls the chain reader for transfers to the receiving address, attributes
//! each by its memo (the paying buyer's id) and credits the buyer's balance
//! exactly once per transfer hash. The in-memory [`SeenCache`] only saves
//! redundant store calls; the ledger's unique index on the hash is what
//! actually prevents double credits, including across restarts.

use std::sync::{Arc, Mutex};

use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, error, info, warn};

use fragshop_ledger::LedgerStore;
use fragshop_types::{
    ChainReader, ChainTransfer, FragshopError, MessagingGateway, Notice, ShopConfig,
};

use crate::seen_cache::SeenCache;

/// Polls the chain and credits attributable deposits.
pub struct DepositReconciler<C, G> {
    chain: Arc<C>,
    gateway: Arc<G>,
    store: LedgerStore,
    config: ShopConfig,
    seen: Mutex<SeenCache>,
}

impl<C: ChainReader, G: MessagingGateway> DepositReconciler<C, G> {
    #[must_use]
    pub fn new(chain: Arc<C>, gateway: Arc<G>, store: LedgerStore, config: ShopConfig) -> Self {
        let seen = Mutex::new(SeenCache::new(config.seen_cache_max, config.seen_cache_retain));
        Self {
            chain,
            gateway,
            store,
            config,
            seen,
        }
    }

    /// Mark everything currently visible as seen without crediting.
    ///
    /// Run once at startup so transfers processed by a previous run are not
    /// re-announced. Any of them that never made it into the ledger would be
    /// rejected by the unique index anyway; priming just avoids the noise.
    ///
    /// # Errors
    /// Propagates a failed chain read; the caller decides whether a cold
    /// start without priming is acceptable.
    pub async fn prime(&self) -> fragshop_types::Result<usize> {
        let transfers = self.chain.recent_transfers(&self.config.receiving_address).await?;
        let mut seen = self.seen.lock().expect("seen cache mutex poisoned");
        let mut primed = 0;
        for tx in &transfers {
            if seen.insert(&tx.tx_hash) {
                primed += 1;
            }
        }
        info!(primed, "reconciler primed with existing transfers");
        Ok(primed)
    }

    /// One reconciliation pass. Returns how many deposits were credited.
    ///
    /// A failed chain read is logged and yields zero credits; the loop
    /// carries on at the next tick.
    pub async fn poll_once(&self) -> usize {
        let transfers = match self.chain.recent_transfers(&self.config.receiving_address).await {
            Ok(transfers) => transfers,
            Err(err) => {
                error!(%err, "chain read failed; skipping this pass");
                return 0;
            }
        };

        let mut credited = 0;
        for tx in transfers {
            if !self.seen.lock().expect("seen cache mutex poisoned").insert(&tx.tx_hash) {
                continue;
            }
            if self.credit(&tx).await {
                credited += 1;
            }
        }
        credited
    }

    /// Prime, then run the polling loop forever.
    pub async fn run(&self) {
        if let Err(err) = self.prime().await {
            warn!(%err, "priming failed; starting with an empty seen-cache");
        }
        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        info!(
            interval_secs = self.config.poll_interval.as_secs(),
            address = %self.config.receiving_address,
            "deposit reconciler started"
        );
        loop {
            ticker.tick().await;
            let credited = self.poll_once().await;
            if credited > 0 {
                debug!(credited, "reconciliation pass complete");
            }
        }
    }

    /// Attribute and credit one new transfer. Returns whether it credited.
    async fn credit(&self, tx: &ChainTransfer) -> bool {
        let Some(buyer) = tx.memo_buyer_id() else {
            warn!(hash = %tx.tx_hash, memo = ?tx.memo, "unattributable deposit skipped");
            return false;
        };
        let amount = tx.amount_ton();

        let new_balance = match self.store.record_deposit(buyer, amount, &tx.tx_hash) {
            Ok(balance) => balance,
            Err(FragshopError::DuplicateDeposit { .. }) => {
                // Already journaled (evicted from the cache, or a restart).
                debug!(hash = %tx.tx_hash, "transfer already credited");
                return false;
            }
            Err(FragshopError::NonPositiveAmount) => {
                warn!(hash = %tx.tx_hash, "zero-amount transfer skipped");
                return false;
            }
            Err(err) => {
                error!(hash = %tx.tx_hash, %err, "deposit credit failed");
                return false;
            }
        };

        info!(%buyer, %amount, %new_balance, hash = %tx.tx_hash, "deposit credited");

        let price = self.store.price();
        let purchasing_power = if price > rust_decimal::Decimal::ZERO {
            (new_balance / price).trunc().to_u64().unwrap_or(0)
        } else {
            0
        };
        if let Err(err) = self
            .gateway
            .notify(
                buyer,
                Notice::DepositCredited {
                    amount,
                    new_balance,
                    purchasing_power,
                },
            )
            .await
        {
            // The credit stands; only the announcement was lost.
            warn!(%buyer, %err, "deposit notification failed");
        }
        true
    }
}
