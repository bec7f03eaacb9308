//! # fragshop-delivery
//!
//! Per-buyer delivery orchestration:
//!
//! - [`DeliveryCoordinator`] — after a reservation, opens a provider session
//!   on the reserved account and races the login code against buyer
//!   cancellation and the hard deadline. Settlement runs only once the code
//!   is in the buyer's hands.
//! - [`OnboardingManager`] — the admin flow that logs into a fresh account
//!   (code, optionally a secondary password) and adds it to stock.

pub mod coordinator;
pub mod onboarding;

pub use coordinator::{DeliveryCoordinator, DeliveryOutcome};
pub use onboarding::{OnboardingManager, OnboardingStep};
