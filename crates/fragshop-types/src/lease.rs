//! The lease — an exclusive, buyer-scoped claim on one account.
//!
//! A lease is created only by a successful reservation and destroyed only by
//! settlement or release. It serves double duty as a mutual-exclusion lock
//! (the buyer id is the table's primary key, so at most one in-flight
//! purchase can exist per buyer) and as the pointer from a buyer back to the
//! account reserved for them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, BuyerId};

/// An in-flight purchase claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    /// The buyer holding the lease (unique — primary key).
    pub buyer_id: BuyerId,
    /// The account reserved for this buyer.
    pub account_id: AccountId,
    /// When the reservation was made. The delivery deadline is measured
    /// from this instant, not from listener start.
    pub reserved_at: DateTime<Utc>,
}

impl Lease {
    #[must_use]
    pub fn new(buyer_id: BuyerId, account_id: AccountId) -> Self {
        Self {
            buyer_id,
            account_id,
            reserved_at: Utc::now(),
        }
    }
}
