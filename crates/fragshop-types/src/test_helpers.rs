//! Mock collaborators for tests (enabled with the `test-helpers` feature).
//!
//! These stand in for the three external systems: a recording messaging
//! gateway, a scripted session provider, and a static chain reader. They are
//! deliberately simple — behavior is configured up front and inspected after.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    BuyerId, ChainReader, ChainTransfer, CodePattern, CredentialBundle, FragshopError,
    LoginStep, MessagingGateway, Notice, Result, SenderId, SessionId, SessionProvider,
};

// ---------------------------------------------------------------------------
// RecordingGateway
// ---------------------------------------------------------------------------

/// Records every notice; optionally fails all sends.
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<(BuyerId, Notice)>>,
    fail_all: AtomicBool,
    failures: AtomicUsize,
}

impl RecordingGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `notify` fail (blocked recipient).
    pub fn fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// All notices sent so far, in order.
    #[must_use]
    pub fn sent(&self) -> Vec<(BuyerId, Notice)> {
        self.sent.lock().expect("gateway mutex").clone()
    }

    /// Notices sent to one recipient, in order.
    #[must_use]
    pub fn notices_for(&self, buyer: BuyerId) -> Vec<Notice> {
        self.sent()
            .into_iter()
            .filter(|(b, _)| *b == buyer)
            .map(|(_, n)| n)
            .collect()
    }

    /// How many sends failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn notify(&self, recipient: BuyerId, notice: Notice) -> Result<()> {
        if self.fail_all.load(Ordering::SeqCst) {
            self.failures.fetch_add(1, Ordering::SeqCst);
            return Err(FragshopError::NotifyFailed {
                reason: "recipient blocked the bot".into(),
            });
        }
        self.sent.lock().expect("gateway mutex").push((recipient, notice));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ScriptedSession
// ---------------------------------------------------------------------------

/// What the scripted provider does when asked to wait for a login code.
#[derive(Debug, Clone)]
pub enum CodeScript {
    /// Deliver `text` after `after` elapses (if within the caller's deadline).
    Deliver { after: Duration, text: String },
    /// Never deliver anything; report a provider-side timeout at the deadline.
    Silent,
}

/// A session provider with pre-scripted behavior.
pub struct ScriptedSession {
    code: Mutex<CodeScript>,
    open_error: Mutex<Option<String>>,
    opened: AtomicUsize,
    closed: Mutex<Vec<SessionId>>,
    needs_password: AtomicBool,
    reject_code: AtomicBool,
    reject_password: AtomicBool,
}

impl ScriptedSession {
    /// Provider that delivers `text` after `after`.
    #[must_use]
    pub fn delivering(text: impl Into<String>, after: Duration) -> Self {
        Self::with_script(CodeScript::Deliver {
            after,
            text: text.into(),
        })
    }

    /// Provider on which no code ever arrives.
    #[must_use]
    pub fn silent() -> Self {
        Self::with_script(CodeScript::Silent)
    }

    #[must_use]
    pub fn with_script(code: CodeScript) -> Self {
        Self {
            code: Mutex::new(code),
            open_error: Mutex::new(None),
            opened: AtomicUsize::new(0),
            closed: Mutex::new(Vec::new()),
            needs_password: AtomicBool::new(false),
            reject_code: AtomicBool::new(false),
            reject_password: AtomicBool::new(false),
        }
    }

    /// Make `open_session` fail with a session error.
    pub fn fail_open(&self, reason: impl Into<String>) {
        *self.open_error.lock().expect("session mutex") = Some(reason.into());
    }

    /// Script the onboarding flow.
    pub fn set_needs_password(&self, needs: bool) {
        self.needs_password.store(needs, Ordering::SeqCst);
    }

    pub fn set_reject_code(&self, reject: bool) {
        self.reject_code.store(reject, Ordering::SeqCst);
    }

    pub fn set_reject_password(&self, reject: bool) {
        self.reject_password.store(reject, Ordering::SeqCst);
    }

    #[must_use]
    pub fn open_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Sessions closed so far.
    #[must_use]
    pub fn closed_sessions(&self) -> Vec<SessionId> {
        self.closed.lock().expect("session mutex").clone()
    }
}

#[async_trait]
impl SessionProvider for ScriptedSession {
    async fn open_session(&self, _credentials: &CredentialBundle) -> Result<SessionId> {
        if let Some(reason) = self.open_error.lock().expect("session mutex").clone() {
            return Err(FragshopError::SessionError { reason });
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(SessionId::new())
    }

    async fn await_system_message(
        &self,
        _session: SessionId,
        _sender: SenderId,
        pattern: CodePattern,
        deadline: Duration,
    ) -> Result<Option<String>> {
        let script = self.code.lock().expect("session mutex").clone();
        match script {
            CodeScript::Deliver { after, text } if after <= deadline => {
                tokio::time::sleep(after).await;
                // The provider only reports messages matching the pattern.
                if pattern.extract(&text).is_some() {
                    Ok(Some(text))
                } else {
                    tokio::time::sleep(deadline.saturating_sub(after)).await;
                    Ok(None)
                }
            }
            CodeScript::Deliver { .. } | CodeScript::Silent => {
                tokio::time::sleep(deadline).await;
                Ok(None)
            }
        }
    }

    async fn close_session(&self, session: SessionId) {
        self.closed.lock().expect("session mutex").push(session);
    }

    async fn begin_login(&self, _phone: &str) -> Result<(SessionId, String)> {
        if let Some(reason) = self.open_error.lock().expect("session mutex").clone() {
            return Err(FragshopError::SessionError { reason });
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok((SessionId::new(), "code-token".to_string()))
    }

    async fn submit_code(
        &self,
        _session: SessionId,
        _code_token: &str,
        _code: &str,
    ) -> Result<LoginStep> {
        if self.reject_code.load(Ordering::SeqCst) {
            return Err(FragshopError::LoginCodeInvalid);
        }
        if self.needs_password.load(Ordering::SeqCst) {
            Ok(LoginStep::NeedsPassword)
        } else {
            Ok(LoginStep::Complete {
                session_token: "scripted-session".to_string(),
            })
        }
    }

    async fn submit_password(&self, _session: SessionId, _password: &str) -> Result<String> {
        if self.reject_password.load(Ordering::SeqCst) {
            return Err(FragshopError::PasswordInvalid);
        }
        Ok("scripted-session-2fa".to_string())
    }
}

// ---------------------------------------------------------------------------
// StaticChain
// ---------------------------------------------------------------------------

/// A chain reader serving a mutable in-memory transfer list.
#[derive(Default)]
pub struct StaticChain {
    transfers: Mutex<Vec<ChainTransfer>>,
    fail_next: AtomicBool,
    calls: AtomicUsize,
}

impl StaticChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transfer to the visible window.
    pub fn push(&self, transfer: ChainTransfer) {
        self.transfers.lock().expect("chain mutex").push(transfer);
    }

    /// Replace the visible window.
    pub fn set(&self, transfers: Vec<ChainTransfer>) {
        *self.transfers.lock().expect("chain mutex") = transfers;
    }

    /// Make the next read fail once.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainReader for StaticChain {
    async fn recent_transfers(&self, _address: &str) -> Result<Vec<ChainTransfer>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(FragshopError::Internal("chain read failed".into()));
        }
        Ok(self.transfers.lock().expect("chain mutex").clone())
    }
}
