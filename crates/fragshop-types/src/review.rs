//! Post-purchase reviews.
//!
//! One review per user; a saved review earns a one-time balance reward.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::BuyerId;

/// A buyer's review of the shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Reviewer (unique — one review per user).
    pub user_id: BuyerId,
    pub handle: String,
    /// Star rating, 1..=5.
    pub rating: u8,
    pub text: String,
    /// Whether the review reward has been credited.
    pub rewarded: bool,
    pub created_at: DateTime<Utc>,
}

impl Review {
    #[must_use]
    pub fn new(user_id: BuyerId, handle: impl Into<String>, rating: u8, text: impl Into<String>) -> Self {
        Self {
            user_id,
            handle: handle.into(),
            rating,
            text: text.into(),
            rewarded: false,
            created_at: Utc::now(),
        }
    }
}
