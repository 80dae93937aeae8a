//! Saga error types.

use bundle_store::StoreError;
use domain::ValidationError;
use messaging::MessagingError;
use thiserror::Error;

/// Errors that can occur while driving a VIP bundle process.
///
/// Store and messaging errors are transient transport failures and
/// propagate unchanged so the delivery layer can redeliver. Business
/// failures never surface here; they arrive as `*Failed` events and are
/// handled by the rollback path.
#[derive(Debug, Error)]
pub enum SagaError {
    /// Bundle store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Command bus or event bus error.
    #[error("messaging error: {0}")]
    Messaging(#[from] MessagingError),

    /// Bundle construction failed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Rollback cannot refund tickets until every confirmation arrived.
    ///
    /// Transient: the delivery layer should redeliver the failure event
    /// once the remaining `TicketBookingConfirmed` events are in.
    #[error("cannot roll back yet: {actual} of {expected} ticket confirmations arrived")]
    IncompleteState { expected: u32, actual: usize },

    /// The stored bundle contradicts the incoming event.
    ///
    /// Fatal: indicates corruption or a protocol mismatch. Must not be
    /// retried blindly or silently absorbed.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience type alias for saga results.
pub type Result<T> = std::result::Result<T, SagaError>;
