//! Messaging error types.

use thiserror::Error;

/// Errors surfaced by the command and event buses.
///
/// These are transport failures, never business failures: business
/// outcomes arrive as events. Callers propagate them unchanged so the
/// delivery layer can redeliver.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// The command bus could not accept the command.
    #[error("could not send command: {0}")]
    Send(String),

    /// The event bus could not accept the event.
    #[error("could not publish event: {0}")]
    Publish(String),
}
