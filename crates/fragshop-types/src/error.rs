//! Error types for the Fragshop broker.
//!
//! All errors use the `FS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Stock / lease errors
//! - 2xx: Balance errors
//! - 3xx: Session / provider errors
//! - 4xx: Deposit reconciliation errors
//! - 5xx: Review / settings errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AccountId, BuyerId};

/// Central error enum for all Fragshop operations.
#[derive(Debug, Error)]
pub enum FragshopError {
    // =================================================================
    // Stock / Lease Errors (1xx)
    // =================================================================
    /// No available account in stock — user-visible, retry later.
    #[error("FS_ERR_100: No accounts in stock")]
    NoStock,

    /// The buyer already has an in-flight purchase. At most one lease may
    /// exist per buyer; the store's unique key on the lease table enforces
    /// this, not any in-process check.
    #[error("FS_ERR_101: Buyer already has an active purchase: {0}")]
    AlreadyLeased(BuyerId),

    /// The requested account does not exist (or is not in the expected state).
    #[error("FS_ERR_102: Account not found: {0}")]
    AccountNotFound(AccountId),

    // =================================================================
    // Balance Errors (2xx)
    // =================================================================
    /// Not enough balance for the operation.
    #[error("FS_ERR_200: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// An amount that must be positive was zero or negative.
    #[error("FS_ERR_201: Invalid amount: {0}")]
    InvalidAmount(Decimal),

    // =================================================================
    // Session / Provider Errors (3xx)
    // =================================================================
    /// The session provider failed (network, provider error).
    /// Surfaced to the buyer as "not charged"; the account is released.
    #[error("FS_ERR_300: Session error: {reason}")]
    SessionError { reason: String },

    /// The login code submitted during onboarding was rejected.
    #[error("FS_ERR_301: Invalid login code")]
    LoginCodeInvalid,

    /// The secondary password submitted during onboarding was rejected.
    #[error("FS_ERR_302: Invalid secondary password")]
    PasswordInvalid,

    /// Onboarding step arrived with no pending login for that admin.
    #[error("FS_ERR_303: No pending login")]
    NoPendingLogin,

    /// The provider is rate-limiting login attempts.
    #[error("FS_ERR_304: Flood wait: retry in {seconds}s")]
    FloodWait { seconds: u64 },

    // =================================================================
    // Deposit Reconciliation Errors (4xx)
    // =================================================================
    /// A transaction row with this external id already exists. This is the
    /// sole at-most-once guarantee for deposit crediting; the reconciler
    /// ignores it silently.
    #[error("FS_ERR_400: Duplicate deposit: {tx_hash}")]
    DuplicateDeposit { tx_hash: String },

    /// The transfer memo does not parse as a positive buyer id. The deposit
    /// is unattributable: skipped, logged, never retried.
    #[error("FS_ERR_401: Invalid memo: {memo:?}")]
    InvalidMemo { memo: Option<String> },

    /// The transferred amount was zero or negative.
    #[error("FS_ERR_402: Non-positive transfer amount")]
    NonPositiveAmount,

    // =================================================================
    // Review / Settings Errors (5xx)
    // =================================================================
    /// The user already submitted a review (one review per user).
    #[error("FS_ERR_500: Already reviewed: {0}")]
    AlreadyReviewed(BuyerId),

    /// Review rating outside 1..=5.
    #[error("FS_ERR_501: Invalid rating: {0}")]
    InvalidRating(u8),

    /// Unit price must be positive.
    #[error("FS_ERR_502: Invalid price: {0}")]
    InvalidPrice(Decimal),

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("FS_ERR_900: Internal error: {0}")]
    Internal(String),

    /// A gateway notification could not be delivered (blocked/deleted
    /// recipient). Counted for reporting, never propagated as a core error.
    #[error("FS_ERR_901: Notification failed: {reason}")]
    NotifyFailed { reason: String },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, FragshopError>;
