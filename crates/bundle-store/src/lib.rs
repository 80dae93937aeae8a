//! Durable state storage for VIP bundle process instances.
//!
//! One record per bundle, addressable by its bundle ID or by the
//! correlated booking ID. All mutation goes through an atomic
//! read-modify-write, so concurrently delivered events for the same
//! bundle serialize instead of losing updates.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use error::{Result, StoreError};
pub use memory::InMemoryVipBundleRepository;
pub use postgres::PostgresVipBundleRepository;
pub use repository::VipBundleRepository;
