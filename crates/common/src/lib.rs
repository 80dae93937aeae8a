pub mod types;

pub use types::{BookingId, BundleId};
