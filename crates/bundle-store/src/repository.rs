use async_trait::async_trait;
use common::{BookingId, BundleId};
use domain::VipBundle;

use crate::Result;

/// Durable keyed storage for VIP bundle process instances.
///
/// Operations are linearizable per bundle: updates to the same bundle
/// serialize, updates to different bundles proceed independently. The
/// mutation passed to an update method runs inside the atomic unit;
/// if it fails, nothing is persisted and its error is returned.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait VipBundleRepository: Send + Sync {
    /// Stores a new bundle.
    ///
    /// Fails with [`StoreError::AlreadyExists`](crate::StoreError::AlreadyExists)
    /// if a bundle with the same ID is already stored.
    async fn add(&self, bundle: VipBundle) -> Result<()>;

    /// Loads a bundle by its primary key.
    async fn get(&self, bundle_id: BundleId) -> Result<VipBundle>;

    /// Loads a bundle by the correlated booking ID.
    async fn get_by_booking_id(&self, booking_id: BookingId) -> Result<VipBundle>;

    /// Atomically loads, mutates, and persists a bundle.
    ///
    /// Returns the persisted value.
    async fn update<F>(&self, bundle_id: BundleId, mutate: F) -> Result<VipBundle>
    where
        F: FnOnce(VipBundle) -> Result<VipBundle> + Send + 'static;

    /// Same as [`update`](Self::update), keyed by the booking ID.
    async fn update_by_booking_id<F>(&self, booking_id: BookingId, mutate: F) -> Result<VipBundle>
    where
        F: FnOnce(VipBundle) -> Result<VipBundle> + Send + 'static;
}
