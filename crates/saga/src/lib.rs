//! Process manager for VIP bundle bookings.
//!
//! A VIP bundle is one cross-service transaction: show tickets, an
//! inbound flight, a return flight, and a taxi. The process manager
//! drives it from asynchronous events. Each success event advances the
//! bundle and issues the next command; each failure event routes into a
//! single rollback path that compensates whatever already succeeded
//! (ticket refunds, flight cancellations).
//!
//! Delivery is at-least-once with no ordering guarantee, so every
//! handler re-reads the bundle through the repository's atomic
//! read-modify-write and tolerates duplicated or reordered events.

pub mod error;
pub mod process_manager;
pub mod service;

pub use error::SagaError;
pub use process_manager::VipBundleProcessManager;
pub use service::{VipBundleRequest, VipBundleService};
