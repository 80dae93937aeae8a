use common::{BookingId, BundleId};
use thiserror::Error;

/// Errors that can occur when interacting with the bundle store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A bundle with this ID is already stored.
    #[error("vip bundle already exists: {0}")]
    AlreadyExists(BundleId),

    /// No bundle is stored under this ID.
    #[error("vip bundle not found: {0}")]
    NotFound(BundleId),

    /// No bundle is correlated with this booking ID.
    #[error("vip bundle not found for booking: {0}")]
    BookingNotFound(BookingId),

    /// The mutation aborted the update; nothing was persisted.
    #[error("update rejected: {0}")]
    UpdateRejected(String),

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for bundle store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
