//! Messaging contracts for the VIP bundle system.
//!
//! Commands and events are closed sum types: the process manager
//! dispatches over the enumerated variants rather than over open payloads,
//! so an unknown message is a compile error, not a silent no-op.
//!
//! The bus traits only promise at-least-once, asynchronous delivery;
//! consumers must tolerate duplicates and reordering.

pub mod bus;
pub mod commands;
pub mod error;
pub mod events;
pub mod memory;

pub use bus::{CommandBus, EventBus};
pub use commands::{
    BookFlightData, BookShowTicketsData, BookTaxiData, CancelFlightTicketsData, Command,
    RefundTicketData,
};
pub use error::MessagingError;
pub use events::{
    BookingFailedData, BookingMadeData, Event, EventHeader, FlightBookedData,
    FlightBookingFailedData, TaxiBookedData, TaxiBookingFailedData, TicketBookingConfirmedData,
    VipBundleFinalizedData, VipBundleInitializedData,
};
pub use memory::{InMemoryCommandBus, InMemoryEventBus};
