//! # fragshop-reserve
//!
//! The reservation manager: turns "buy" intents into exclusive account
//! leases. All exclusivity guarantees are delegated to the ledger store;
//! this crate adds the affordability pre-check and release policy on top.

pub mod reservation;

pub use reservation::ReservationManager;
