//! In-memory bus implementations for testing.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::bus::{CommandBus, EventBus};
use crate::commands::Command;
use crate::error::MessagingError;
use crate::events::Event;

#[derive(Debug, Default)]
struct InMemoryCommandBusState {
    sent: Vec<Command>,
    fail_on_send: bool,
}

/// In-memory command bus for testing.
///
/// Records every sent command so tests can assert on the exact command
/// stream, and can be switched to refuse sends to exercise the
/// transport-failure path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommandBus {
    state: Arc<RwLock<InMemoryCommandBusState>>,
}

impl InMemoryCommandBus {
    /// Creates a new in-memory command bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the bus to refuse the next send calls.
    pub fn set_fail_on_send(&self, fail: bool) {
        self.state.write().unwrap().fail_on_send = fail;
    }

    /// Returns a snapshot of every command sent so far, in order.
    pub fn sent(&self) -> Vec<Command> {
        self.state.read().unwrap().sent.clone()
    }

    /// Returns the number of commands sent so far.
    pub fn sent_count(&self) -> usize {
        self.state.read().unwrap().sent.len()
    }
}

#[async_trait]
impl CommandBus for InMemoryCommandBus {
    async fn send(&self, command: Command) -> Result<(), MessagingError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_send {
            return Err(MessagingError::Send("command bus unavailable".to_string()));
        }

        state.sent.push(command);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct InMemoryEventBusState {
    published: Vec<Event>,
    fail_on_publish: bool,
}

/// In-memory event bus for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventBus {
    state: Arc<RwLock<InMemoryEventBusState>>,
}

impl InMemoryEventBus {
    /// Creates a new in-memory event bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the bus to refuse the next publish calls.
    pub fn set_fail_on_publish(&self, fail: bool) {
        self.state.write().unwrap().fail_on_publish = fail;
    }

    /// Returns a snapshot of every event published so far, in order.
    pub fn published(&self) -> Vec<Event> {
        self.state.read().unwrap().published.clone()
    }

    /// Returns the number of events published so far.
    pub fn published_count(&self) -> usize {
        self.state.read().unwrap().published.len()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: Event) -> Result<(), MessagingError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_publish {
            return Err(MessagingError::Publish("event bus unavailable".to_string()));
        }

        state.published.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{BookingId, BundleId};
    use domain::ShowId;

    #[tokio::test]
    async fn test_command_bus_records_sends() {
        let bus = InMemoryCommandBus::new();
        let command = Command::book_show_tickets(BookingId::new(), "a@b.com", 2, ShowId::new());

        bus.send(command.clone()).await.unwrap();

        assert_eq!(bus.sent_count(), 1);
        assert_eq!(bus.sent(), vec![command]);
    }

    #[tokio::test]
    async fn test_command_bus_fail_on_send() {
        let bus = InMemoryCommandBus::new();
        bus.set_fail_on_send(true);

        let command = Command::book_show_tickets(BookingId::new(), "a@b.com", 2, ShowId::new());
        let result = bus.send(command).await;

        assert!(matches!(result, Err(MessagingError::Send(_))));
        assert_eq!(bus.sent_count(), 0);

        bus.set_fail_on_send(false);
        let command = Command::book_show_tickets(BookingId::new(), "a@b.com", 2, ShowId::new());
        bus.send(command).await.unwrap();
        assert_eq!(bus.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_event_bus_records_publishes() {
        let bus = InMemoryEventBus::new();
        let event = Event::vip_bundle_initialized(BundleId::new());

        bus.publish(event.clone()).await.unwrap();

        assert_eq!(bus.published_count(), 1);
        assert_eq!(bus.published(), vec![event]);
    }

    #[tokio::test]
    async fn test_event_bus_fail_on_publish() {
        let bus = InMemoryEventBus::new();
        bus.set_fail_on_publish(true);

        let result = bus.publish(Event::vip_bundle_initialized(BundleId::new())).await;

        assert!(matches!(result, Err(MessagingError::Publish(_))));
        assert_eq!(bus.published_count(), 0);
    }
}
