//! The messaging gateway — the core's only outbound path to users.
//!
//! The core never formats UI text; it hands the gateway a structured
//! [`Notice`] and the front end renders it. Notifications are fire-and-forget
//! from the core's perspective: a failure (blocked or deleted recipient) is
//! logged and counted by the caller, never propagated as a core error.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BuyerId, Result};

/// A structured message for the front end to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// The login code arrived; hand over everything needed to log in.
    CodeDelivery {
        phone: String,
        code: String,
        secondary_password: Option<String>,
    },
    /// Settlement ran; tell the buyer what was debited.
    PaymentDebited {
        price: Decimal,
        new_balance: Decimal,
    },
    /// Best-effort post-purchase prompt: leave a review, get rewarded.
    ReviewPrompt { reward: Decimal },
    /// Buyer-initiated cancellation: account released, not charged.
    PurchaseCancelled,
    /// No code arrived within the deadline: account released, not charged.
    DeliveryTimedOut,
    /// Session/provider failure: account released, not charged.
    DeliveryFailed { reason: String },
    /// A deposit was credited.
    DepositCredited {
        amount: Decimal,
        new_balance: Decimal,
        /// How many accounts the new balance buys at the current price.
        purchasing_power: u64,
    },
    /// An admin adjusted the balance.
    BalanceAdjusted {
        amount: Decimal,
        new_balance: Decimal,
    },
}

impl Notice {
    /// Whether this notice tells the buyer they were charged. The statement
    /// must be literally correct: `true` only when settlement has run.
    #[must_use]
    pub fn implies_charged(&self) -> bool {
        matches!(self, Self::PaymentDebited { .. })
    }
}

/// Outbound interface to the messaging front end.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Deliver a structured notice to a recipient.
    ///
    /// # Errors
    /// Returns [`crate::FragshopError::NotifyFailed`] when the recipient is
    /// unreachable; callers treat this as a counted failure, not a core error
    /// (except code delivery itself — see the delivery coordinator).
    async fn notify(&self, recipient: BuyerId, notice: Notice) -> Result<()>;
}
