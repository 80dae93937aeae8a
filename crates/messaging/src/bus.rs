//! Command bus and event bus contracts.

use async_trait::async_trait;

use crate::commands::Command;
use crate::error::MessagingError;
use crate::events::Event;

/// Sends commands to exactly one downstream handler, at least once.
#[async_trait]
pub trait CommandBus: Send + Sync {
    /// Hands the command to the transport. Returns once the transport
    /// has accepted it (success) or refused it (error).
    async fn send(&self, command: Command) -> Result<(), MessagingError>;
}

/// Publishes events to all subscribers, at least once.
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Hands the event to the transport. Returns once the transport
    /// has accepted it (success) or refused it (error).
    async fn publish(&self, event: Event) -> Result<(), MessagingError>;
}
