//! The session provider — the external login-code service.
//!
//! Two flows share this interface:
//!
//! - **Delivery**: open a session on a sold account's credentials and wait
//!   for the system sender's login-code message.
//! - **Onboarding**: drive a fresh login (code, then optionally a secondary
//!   password) to mint a credential bundle for a new stock account.
//!
//! Session handles are opaque [`SessionId`]s; every opened session must be
//! closed exactly once, on every terminal path.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{CodePattern, CredentialBundle, Result, SenderId, SessionId};

/// Result of submitting a login code during onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginStep {
    /// Login complete; the provider returns the serialized session.
    Complete { session_token: String },
    /// The account has a secondary password; submit it to finish.
    NeedsPassword,
}

/// Interface to the external login-code provider.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Open a session from a credential bundle.
    async fn open_session(&self, credentials: &CredentialBundle) -> Result<SessionId>;

    /// Wait for an inbound message from `sender` whose text matches
    /// `pattern`, up to `deadline`. Returns the message text, or `None` on
    /// a provider-side timeout.
    async fn await_system_message(
        &self,
        session: SessionId,
        sender: SenderId,
        pattern: CodePattern,
        deadline: Duration,
    ) -> Result<Option<String>>;

    /// Close a session. Idempotent; never fails.
    async fn close_session(&self, session: SessionId);

    /// Start a fresh login for onboarding. Returns the pending session and
    /// the provider's code-verification token.
    async fn begin_login(&self, phone: &str) -> Result<(SessionId, String)>;

    /// Submit the login code received on the phone.
    async fn submit_code(
        &self,
        session: SessionId,
        code_token: &str,
        code: &str,
    ) -> Result<LoginStep>;

    /// Submit the secondary password (when [`LoginStep::NeedsPassword`]).
    /// Returns the serialized session on success.
    async fn submit_password(&self, session: SessionId, password: &str) -> Result<String>;
}
