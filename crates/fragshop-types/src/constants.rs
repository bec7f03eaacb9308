//! System-wide constants for the Fragshop broker.

/// Hard upper bound on a delivery wait, in seconds, measured from lease
/// acquisition (not listener start) to bound total exposure.
pub const DELIVERY_DEADLINE_SECS: u64 = 300;

/// Deposit reconciler polling interval in seconds.
pub const POLL_INTERVAL_SECS: u64 = 30;

/// The provider's fixed system sender that delivers login codes.
pub const CODE_SENDER_ID: i64 = 777_000;

/// Minimum digits in a login code.
pub const CODE_MIN_DIGITS: usize = 5;

/// Maximum digits in a login code.
pub const CODE_MAX_DIGITS: usize = 6;

/// Seen-cache size at which the reconciler trims old transfer hashes.
pub const SEEN_CACHE_MAX: usize = 1000;

/// How many recent transfer hashes survive a seen-cache trim.
pub const SEEN_CACHE_RETAIN: usize = 500;

/// Nano-TON minor units per TON.
pub const NANO_PER_TON: u64 = 1_000_000_000;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name.
pub const SERVICE_NAME: &str = "Fragshop";
