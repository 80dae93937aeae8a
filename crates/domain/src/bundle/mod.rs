//! VIP bundle aggregate and related types.

mod aggregate;
mod status;
mod value_objects;

pub use aggregate::{NewVipBundle, VipBundle};
pub use status::BundleStatus;
pub use value_objects::{FlightId, FlightTicketId, ShowId, TaxiBookingId, TicketId};

use thiserror::Error;

/// Errors that can occur when constructing a VIP bundle.
///
/// Construction checks invariants in a fixed order and reports the
/// first one violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Bundle ID is the nil UUID.
    #[error("vip bundle id must be set")]
    MissingBundleId,

    /// Booking ID is the nil UUID.
    #[error("booking id must be set")]
    MissingBookingId,

    /// Customer email is empty.
    #[error("customer email must be set")]
    MissingCustomerEmail,

    /// Number of tickets is zero.
    #[error("number of tickets must be greater than 0")]
    InvalidNumberOfTickets,

    /// Show ID is the nil UUID.
    #[error("show id must be set")]
    MissingShowId,

    /// Passenger list length does not match the ticket count.
    #[error("number of tickets and passengers count mismatch: {number_of_tickets} tickets, {passengers} passengers")]
    PassengerCountMismatch {
        number_of_tickets: u32,
        passengers: usize,
    },

    /// Inbound flight ID is the nil UUID.
    #[error("inbound flight id must be set")]
    MissingInboundFlightId,

    /// Return flight ID is the nil UUID.
    #[error("return flight id must be set")]
    MissingReturnFlightId,
}
