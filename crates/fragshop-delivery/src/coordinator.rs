//! The delivery race.
//!
//! One delivery task runs per buyer with an active lease. It opens a
//! provider session on the reserved account and waits for the system
//! sender's login-code message, racing three futures:
//!
//! 1. the code arriving,
//! 2. the buyer cancelling,
//! 3. the hard deadline, measured from lease acquisition.
//!
//! Exactly one wins. The buyer is charged if and only if the code was
//! actually handed to them; every other terminal path releases the account
//! back to stock. The session is closed on every path.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;
use tracing::{info, warn};

use fragshop_ledger::LedgerStore;
use fragshop_reserve::ReservationManager;
use fragshop_settlement::Settlement;
use fragshop_types::{
    Account, BuyerId, Lease, MessagingGateway, Notice, SessionProvider, SettlementReceipt,
    ShopConfig,
};

/// How a delivery ended.
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// Code handed over and the purchase settled.
    Delivered(SettlementReceipt),
    /// The buyer cancelled; account released, not charged.
    Cancelled,
    /// Deadline hit with no code; account released, not charged.
    TimedOut,
    /// Session or notification failure; account released, not charged.
    Failed { reason: String },
}

/// Runs the per-buyer delivery race.
pub struct DeliveryCoordinator<S, G> {
    session: Arc<S>,
    gateway: Arc<G>,
    store: LedgerStore,
    reservations: ReservationManager,
    settlement: Settlement,
    config: ShopConfig,
    /// One cancellation handle per in-flight delivery.
    cancels: Mutex<HashMap<BuyerId, Arc<Notify>>>,
}

impl<S: SessionProvider, G: MessagingGateway> DeliveryCoordinator<S, G> {
    #[must_use]
    pub fn new(session: Arc<S>, gateway: Arc<G>, store: LedgerStore, config: ShopConfig) -> Self {
        let reservations = ReservationManager::new(store.clone());
        let settlement = Settlement::new(store.clone());
        Self {
            session,
            gateway,
            store,
            reservations,
            settlement,
            config,
            cancels: Mutex::new(HashMap::new()),
        }
    }

    /// Whether a delivery is currently running for `buyer`.
    #[must_use]
    pub fn in_flight(&self, buyer: BuyerId) -> bool {
        self.cancels.lock().expect("cancel map mutex poisoned").contains_key(&buyer)
    }

    /// Request cancellation of `buyer`'s in-flight delivery. Returns whether
    /// a delivery was there to cancel. Cancellation is advisory: if the code
    /// wins the race first, the purchase still settles.
    pub fn cancel(&self, buyer: BuyerId) -> bool {
        let cancels = self.cancels.lock().expect("cancel map mutex poisoned");
        match cancels.get(&buyer) {
            Some(notify) => {
                notify.notify_one();
                true
            }
            None => false,
        }
    }

    /// Run the delivery race for `buyer`'s reserved account, start to
    /// finish. Requires an active lease; the account is taken from it.
    pub async fn deliver(&self, buyer: BuyerId) -> DeliveryOutcome {
        let Some(account) = self.store.leased_account(buyer) else {
            return DeliveryOutcome::Failed {
                reason: "no active reservation".to_string(),
            };
        };
        let Some(lease) = self.store.lease(buyer) else {
            return DeliveryOutcome::Failed {
                reason: "no active reservation".to_string(),
            };
        };

        // Register the cancel handle; a second concurrent delivery for the
        // same buyer is refused rather than raced.
        let cancel = Arc::new(Notify::new());
        {
            let mut cancels = self.cancels.lock().expect("cancel map mutex poisoned");
            if cancels.contains_key(&buyer) {
                return DeliveryOutcome::Failed {
                    reason: "delivery already in flight".to_string(),
                };
            }
            cancels.insert(buyer, cancel.clone());
        }

        let outcome = self.race(buyer, &account, &lease, &cancel).await;

        self.cancels
            .lock()
            .expect("cancel map mutex poisoned")
            .remove(&buyer);

        match &outcome {
            DeliveryOutcome::Delivered(receipt) => {
                info!(%buyer, account = %receipt.account_id, "delivery complete");
            }
            DeliveryOutcome::Cancelled => {
                self.abort(buyer, Notice::PurchaseCancelled).await;
            }
            DeliveryOutcome::TimedOut => {
                warn!(%buyer, account = %account.id, "delivery deadline hit");
                self.abort(buyer, Notice::DeliveryTimedOut).await;
            }
            DeliveryOutcome::Failed { reason } => {
                warn!(%buyer, account = %account.id, %reason, "delivery failed");
                self.abort(
                    buyer,
                    Notice::DeliveryFailed {
                        reason: reason.clone(),
                    },
                )
                .await;
            }
        }
        outcome
    }

    /// The race itself. Returns without touching the lease except on the
    /// delivered path, where it settles.
    async fn race(
        &self,
        buyer: BuyerId,
        account: &Account,
        lease: &Lease,
        cancel: &Notify,
    ) -> DeliveryOutcome {
        // Deadline is anchored at reservation time, so setup latency eats
        // into the window instead of extending it.
        let elapsed = (chrono::Utc::now() - lease.reserved_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        let Some(remaining) = self.config.delivery_deadline.checked_sub(elapsed) else {
            return DeliveryOutcome::TimedOut;
        };

        let session = match self.session.open_session(&account.credentials).await {
            Ok(session) => session,
            Err(err) => {
                return DeliveryOutcome::Failed {
                    reason: err.to_string(),
                };
            }
        };

        let outcome = tokio::select! {
            message = self.session.await_system_message(
                session,
                self.config.code_sender,
                self.config.code_pattern,
                remaining,
            ) => match message {
                Ok(Some(text)) => self.hand_over(buyer, account, &text).await,
                Ok(None) => DeliveryOutcome::TimedOut,
                Err(err) => DeliveryOutcome::Failed {
                    reason: err.to_string(),
                },
            },
            () = cancel.notified() => DeliveryOutcome::Cancelled,
            () = tokio::time::sleep(remaining) => DeliveryOutcome::TimedOut,
        };

        self.session.close_session(session).await;
        outcome
    }

    /// Code arrived: deliver it, then settle. The charge happens only after
    /// the code notification succeeded; if the buyer is unreachable the
    /// account goes back to stock uncharged.
    async fn hand_over(&self, buyer: BuyerId, account: &Account, text: &str) -> DeliveryOutcome {
        let Some(code) = self.config.code_pattern.extract(text) else {
            return DeliveryOutcome::Failed {
                reason: "code message did not match the expected pattern".to_string(),
            };
        };

        let notice = Notice::CodeDelivery {
            phone: account.phone.clone(),
            code,
            secondary_password: account.credentials.secondary_password.clone(),
        };
        if let Err(err) = self.gateway.notify(buyer, notice).await {
            return DeliveryOutcome::Failed {
                reason: format!("code delivery notification failed: {err}"),
            };
        }

        let Some(receipt) = self.settlement.settle(buyer) else {
            // Lease vanished between hand-over and settlement.
            return DeliveryOutcome::Failed {
                reason: "reservation disappeared before settlement".to_string(),
            };
        };

        // Post-settlement notices are best effort; the sale already stands.
        if let Err(err) = self
            .gateway
            .notify(
                buyer,
                Notice::PaymentDebited {
                    price: receipt.price,
                    new_balance: receipt.new_balance,
                },
            )
            .await
        {
            warn!(%buyer, %err, "debit notification failed");
        }
        if !self.store.has_reviewed(buyer) {
            if let Err(err) = self
                .gateway
                .notify(
                    buyer,
                    Notice::ReviewPrompt {
                        reward: self.config.review_reward,
                    },
                )
                .await
            {
                warn!(%buyer, %err, "review prompt failed");
            }
        }

        DeliveryOutcome::Delivered(receipt)
    }

    /// Non-delivered terminal path: put the account back and tell the buyer
    /// they were not charged. The notice is best effort.
    async fn abort(&self, buyer: BuyerId, notice: Notice) {
        self.reservations.release(buyer);
        debug_assert!(!notice.implies_charged());
        if let Err(err) = self.gateway.notify(buyer, notice).await {
            warn!(%buyer, %err, "release notification failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fragshop_types::test_helpers::{RecordingGateway, ScriptedSession};
    use fragshop_types::CredentialBundle;
    use rust_decimal::Decimal;

    fn setup(
        session: ScriptedSession,
    ) -> (
        Arc<DeliveryCoordinator<ScriptedSession, RecordingGateway>>,
        Arc<RecordingGateway>,
        LedgerStore,
    ) {
        let gateway = Arc::new(RecordingGateway::new());
        let store = LedgerStore::new();
        store.save_account(
            "+14155552671",
            CredentialBundle::new("sess", Some("hunter2".into())),
        );
        let coordinator = Arc::new(DeliveryCoordinator::new(
            Arc::new(session),
            gateway.clone(),
            store.clone(),
            ShopConfig::default(),
        ));
        (coordinator, gateway, store)
    }

    fn reserve(store: &LedgerStore, buyer: BuyerId) {
        store.adjust_balance(buyer, Decimal::ONE).unwrap();
        store.reserve_account(buyer).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn code_arrival_settles_and_notifies() {
        let session = ScriptedSession::delivering(
            "Your login code is 48291",
            Duration::from_secs(3),
        );
        let (coordinator, gateway, store) = setup(session);
        let buyer = BuyerId(1);
        reserve(&store, buyer);

        let outcome = coordinator.deliver(buyer).await;
        let DeliveryOutcome::Delivered(receipt) = outcome else {
            panic!("expected delivery, got {outcome:?}");
        };
        assert_eq!(receipt.price, Decimal::new(1, 1));
        assert_eq!(store.balance(buyer), Decimal::new(9, 1));

        let notices = gateway.notices_for(buyer);
        assert!(matches!(
            &notices[0],
            Notice::CodeDelivery { code, secondary_password: Some(pw), .. }
                if code == "48291" && pw == "hunter2"
        ));
        assert!(matches!(notices[1], Notice::PaymentDebited { .. }));
        assert!(matches!(notices[2], Notice::ReviewPrompt { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_releases_without_charge() {
        let (coordinator, gateway, store) = setup(ScriptedSession::silent());
        let buyer = BuyerId(1);
        reserve(&store, buyer);

        let outcome = coordinator.deliver(buyer).await;
        assert!(matches!(outcome, DeliveryOutcome::TimedOut));
        assert_eq!(store.balance(buyer), Decimal::ONE);
        assert_eq!(store.available_count(), 1);
        assert!(store.lease(buyer).is_none());

        let notices = gateway.notices_for(buyer);
        assert_eq!(notices.len(), 1);
        assert!(matches!(notices[0], Notice::DeliveryTimedOut));
        assert!(!notices[0].implies_charged());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_wins_against_slow_code() {
        let session = ScriptedSession::delivering(
            "Your login code is 48291",
            Duration::from_secs(200),
        );
        let (coordinator, gateway, store) = setup(session);
        let buyer = BuyerId(1);
        reserve(&store, buyer);

        let runner = coordinator.clone();
        let task = tokio::spawn(async move { runner.deliver(buyer).await });
        // Let the race start, then cancel well before the code lands.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(coordinator.cancel(buyer));

        let outcome = task.await.unwrap();
        assert!(matches!(outcome, DeliveryOutcome::Cancelled));
        assert_eq!(store.balance(buyer), Decimal::ONE);
        assert_eq!(store.available_count(), 1);
        assert!(matches!(
            gateway.notices_for(buyer)[0],
            Notice::PurchaseCancelled
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn session_open_failure_releases() {
        let session = ScriptedSession::silent();
        session.fail_open("account banned");
        let (coordinator, gateway, store) = setup(session);
        let buyer = BuyerId(1);
        reserve(&store, buyer);

        let outcome = coordinator.deliver(buyer).await;
        assert!(matches!(outcome, DeliveryOutcome::Failed { .. }));
        assert_eq!(store.available_count(), 1);
        assert_eq!(store.balance(buyer), Decimal::ONE);
        assert!(matches!(
            gateway.notices_for(buyer)[0],
            Notice::DeliveryFailed { .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_buyer_is_never_charged() {
        let session = ScriptedSession::delivering(
            "Your login code is 48291",
            Duration::from_secs(1),
        );
        let (coordinator, gateway, store) = setup(session);
        gateway.fail_all(true);
        let buyer = BuyerId(1);
        reserve(&store, buyer);

        let outcome = coordinator.deliver(buyer).await;
        assert!(matches!(outcome, DeliveryOutcome::Failed { .. }));
        // Code never reached the buyer, so no debit and the account is back.
        assert_eq!(store.balance(buyer), Decimal::ONE);
        assert_eq!(store.available_count(), 1);
        assert!(store.lease(buyer).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn deliver_without_reservation_fails_fast() {
        let (coordinator, _gateway, store) = setup(ScriptedSession::silent());
        let outcome = coordinator.deliver(BuyerId(9)).await;
        assert!(matches!(outcome, DeliveryOutcome::Failed { .. }));
        assert_eq!(store.available_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_without_delivery_is_false() {
        let (coordinator, _gateway, _store) = setup(ScriptedSession::silent());
        assert!(!coordinator.cancel(BuyerId(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn session_closed_on_every_path() {
        let session = ScriptedSession::delivering(
            "Your login code is 48291",
            Duration::from_secs(1),
        );
        let (coordinator, _gateway, store) = setup(session);
        let buyer = BuyerId(1);
        reserve(&store, buyer);
        coordinator.deliver(buyer).await;
        assert_eq!(coordinator.session.closed_sessions().len(), 1);
        assert!(!coordinator.in_flight(buyer));
    }

    #[tokio::test(start_paused = true)]
    async fn no_review_prompt_after_review() {
        let session = ScriptedSession::delivering(
            "Your login code is 48291",
            Duration::from_secs(1),
        );
        let (coordinator, gateway, store) = setup(session);
        let buyer = BuyerId(1);
        store.save_review(buyer, "alice", 5, "great").unwrap();
        reserve(&store, buyer);

        let outcome = coordinator.deliver(buyer).await;
        assert!(matches!(outcome, DeliveryOutcome::Delivered(_)));
        let notices = gateway.notices_for(buyer);
        assert!(
            notices
                .iter()
                .all(|n| !matches!(n, Notice::ReviewPrompt { .. }))
        );
    }
}
