//! Admin onboarding of new stock accounts.
//!
//! Logging into a fresh account is a short stateful dialogue with the
//! provider: request a code, relay the code the phone received, and relay
//! the secondary password when the account has one. One pending login is
//! tracked per admin; starting a new one replaces (and closes) the old.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use fragshop_ledger::LedgerStore;
use fragshop_types::{
    AccountId, BuyerId, CredentialBundle, FragshopError, Result, SessionId, SessionProvider,
};

/// What the flow needs next after a submitted code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingStep {
    /// Login complete; the account is in stock.
    Added(AccountId),
    /// The account has a secondary password; submit it to finish.
    NeedsPassword,
}

#[derive(Debug, Clone)]
struct PendingLogin {
    phone: String,
    session: SessionId,
    code_token: String,
    awaiting_password: bool,
}

/// Drives provider logins and saves the resulting credentials to stock.
pub struct OnboardingManager<S> {
    session: Arc<S>,
    store: LedgerStore,
    pending: Mutex<HashMap<BuyerId, PendingLogin>>,
}

impl<S: SessionProvider> OnboardingManager<S> {
    #[must_use]
    pub fn new(session: Arc<S>, store: LedgerStore) -> Self {
        Self {
            session,
            store,
            pending: Mutex::new(HashMap::new()),
        }
    }

    fn take_pending(&self, admin: BuyerId) -> Option<PendingLogin> {
        self.pending.lock().expect("pending map mutex poisoned").remove(&admin)
    }

    fn put_pending(&self, admin: BuyerId, pending: PendingLogin) {
        self.pending
            .lock()
            .expect("pending map mutex poisoned")
            .insert(admin, pending);
    }

    /// Start a login for `phone`. Any previous pending login of this admin
    /// is abandoned and its session closed.
    ///
    /// # Errors
    /// Propagates provider errors, notably `FloodWait`.
    pub async fn begin(&self, admin: BuyerId, phone: &str) -> Result<()> {
        if let Some(stale) = self.take_pending(admin) {
            warn!(%admin, phone = %stale.phone, "abandoning previous pending login");
            self.session.close_session(stale.session).await;
        }
        let (session, code_token) = self.session.begin_login(phone).await?;
        self.put_pending(
            admin,
            PendingLogin {
                phone: phone.to_string(),
                session,
                code_token,
                awaiting_password: false,
            },
        );
        info!(%admin, %phone, "login started, awaiting code");
        Ok(())
    }

    /// Relay the code the phone received.
    ///
    /// # Errors
    /// - `NoPendingLogin` when nothing is in flight for this admin
    /// - `LoginCodeInvalid` on a rejected code (the login stays pending so
    ///   the admin can retry)
    pub async fn submit_code(&self, admin: BuyerId, code: &str) -> Result<OnboardingStep> {
        let Some(pending) = self.take_pending(admin) else {
            return Err(FragshopError::NoPendingLogin);
        };
        match self
            .session
            .submit_code(pending.session, &pending.code_token, code)
            .await
        {
            Ok(fragshop_types::LoginStep::Complete { session_token }) => {
                let id = self.finish(&pending, session_token, None).await;
                Ok(OnboardingStep::Added(id))
            }
            Ok(fragshop_types::LoginStep::NeedsPassword) => {
                self.put_pending(
                    admin,
                    PendingLogin {
                        awaiting_password: true,
                        ..pending
                    },
                );
                Ok(OnboardingStep::NeedsPassword)
            }
            Err(err @ FragshopError::LoginCodeInvalid) => {
                self.put_pending(admin, pending);
                Err(err)
            }
            Err(err) => {
                self.session.close_session(pending.session).await;
                Err(err)
            }
        }
    }

    /// Relay the secondary password.
    ///
    /// # Errors
    /// - `NoPendingLogin` when no login is awaiting a password
    /// - `PasswordInvalid` on rejection (the login stays pending)
    pub async fn submit_password(&self, admin: BuyerId, password: &str) -> Result<AccountId> {
        let Some(pending) = self.take_pending(admin) else {
            return Err(FragshopError::NoPendingLogin);
        };
        if !pending.awaiting_password {
            self.put_pending(admin, pending);
            return Err(FragshopError::NoPendingLogin);
        }
        match self.session.submit_password(pending.session, password).await {
            Ok(session_token) => {
                let id = self
                    .finish(&pending, session_token, Some(password.to_string()))
                    .await;
                Ok(id)
            }
            Err(err @ FragshopError::PasswordInvalid) => {
                self.put_pending(admin, pending);
                Err(err)
            }
            Err(err) => {
                self.session.close_session(pending.session).await;
                Err(err)
            }
        }
    }

    /// Abandon the admin's pending login. Returns whether one existed.
    pub async fn cancel(&self, admin: BuyerId) -> bool {
        match self.take_pending(admin) {
            Some(pending) => {
                self.session.close_session(pending.session).await;
                true
            }
            None => false,
        }
    }

    /// Whether this admin has a login in flight.
    #[must_use]
    pub fn is_pending(&self, admin: BuyerId) -> bool {
        self.pending
            .lock()
            .expect("pending map mutex poisoned")
            .contains_key(&admin)
    }

    async fn finish(
        &self,
        pending: &PendingLogin,
        session_token: String,
        secondary_password: Option<String>,
    ) -> AccountId {
        self.session.close_session(pending.session).await;
        let id = self.store.save_account(
            &pending.phone,
            CredentialBundle::new(session_token, secondary_password),
        );
        info!(phone = %pending.phone, account = %id, "account onboarded into stock");
        id
    }
}
