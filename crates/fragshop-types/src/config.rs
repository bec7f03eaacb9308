//! Configuration for the Fragshop broker.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{SenderId, constants};

/// The numeric pattern a login code must match: a run of 5–6 digits in a
/// message from the system sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodePattern {
    pub min_digits: usize,
    pub max_digits: usize,
}

impl Default for CodePattern {
    fn default() -> Self {
        Self {
            min_digits: constants::CODE_MIN_DIGITS,
            max_digits: constants::CODE_MAX_DIGITS,
        }
    }
}

impl CodePattern {
    /// Extract the first login code from `text`: the leading digits of the
    /// first digit run at least `min_digits` long, capped at `max_digits`.
    #[must_use]
    pub fn extract(&self, text: &str) -> Option<String> {
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i].is_ascii_digit() {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                let run = i - start;
                if run >= self.min_digits {
                    let end = start + run.min(self.max_digits);
                    return Some(text[start..end].to_string());
                }
            } else {
                i += 1;
            }
        }
        None
    }
}

/// Top-level broker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// The shop's on-chain receiving address.
    pub receiving_address: String,
    /// How often the deposit reconciler polls the chain reader.
    pub poll_interval: Duration,
    /// Hard deadline for a delivery, measured from lease acquisition.
    pub delivery_deadline: Duration,
    /// The system sender login codes arrive from.
    pub code_sender: SenderId,
    /// Login code shape.
    pub code_pattern: CodePattern,
    /// Seen-cache bound and retention for the reconciler.
    pub seen_cache_max: usize,
    pub seen_cache_retain: usize,
    /// One-time reward for leaving a review.
    pub review_reward: Decimal,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            receiving_address: String::new(),
            poll_interval: Duration::from_secs(constants::POLL_INTERVAL_SECS),
            delivery_deadline: Duration::from_secs(constants::DELIVERY_DEADLINE_SECS),
            code_sender: SenderId(constants::CODE_SENDER_ID),
            code_pattern: CodePattern::default(),
            seen_cache_max: constants::SEEN_CACHE_MAX,
            seen_cache_retain: constants::SEEN_CACHE_RETAIN,
            review_reward: Decimal::new(5, 1), // 0.5 TON
        }
    }
}
