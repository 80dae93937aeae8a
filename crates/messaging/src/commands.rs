//! Commands sent to the downstream booking services.

use common::{BookingId, BundleId};
use domain::{FlightId, FlightTicketId, ShowId, TicketId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Commands the process manager issues to downstream services.
///
/// Every command is handled by exactly one downstream handler. Commands
/// that trigger a non-idempotent side effect carry an idempotency key so
/// the receiving service can deduplicate retried requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Command {
    /// Book the show tickets for a bundle.
    BookShowTickets(BookShowTicketsData),

    /// Book one flight leg.
    BookFlight(BookFlightData),

    /// Book the taxi transfer.
    BookTaxi(BookTaxiData),

    /// Refund a single confirmed show ticket.
    RefundTicket(RefundTicketData),

    /// Cancel the flight tickets of one booked leg.
    CancelFlightTickets(CancelFlightTicketsData),
}

impl Command {
    /// Returns the command name as a static string.
    pub fn command_type(&self) -> &'static str {
        match self {
            Command::BookShowTickets(_) => "BookShowTickets",
            Command::BookFlight(_) => "BookFlight",
            Command::BookTaxi(_) => "BookTaxi",
            Command::RefundTicket(_) => "RefundTicket",
            Command::CancelFlightTickets(_) => "CancelFlightTickets",
        }
    }
}

/// Data for the BookShowTickets command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookShowTicketsData {
    /// Booking ID correlating the ticket sub-flow back to the bundle.
    pub booking_id: BookingId,
    /// Customer the tickets are booked for.
    pub customer_email: String,
    /// How many tickets to book.
    pub number_of_tickets: u32,
    /// The show to book tickets for.
    pub show_id: ShowId,
}

/// Data for the BookFlight command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookFlightData {
    /// Customer the flight is booked for.
    pub customer_email: String,
    /// The flight leg to book.
    pub flight_id: FlightId,
    /// Passenger names, one per seat.
    pub passengers: Vec<String>,
    /// Bundle ID the flight service echoes back in its events.
    pub reference_id: BundleId,
    /// Fresh per attempt; the flight service deduplicates with it.
    pub idempotency_key: String,
}

/// Data for the BookTaxi command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookTaxiData {
    /// Customer the taxi is booked for.
    pub customer_email: String,
    /// Name given to the driver.
    pub customer_name: String,
    /// Seats needed.
    pub number_of_passengers: u32,
    /// Bundle ID the taxi service echoes back in its events.
    pub reference_id: BundleId,
    /// Fresh per attempt; the taxi service deduplicates with it.
    pub idempotency_key: String,
}

/// Data for the RefundTicket command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundTicketData {
    /// The confirmed ticket to refund.
    pub ticket_id: TicketId,
}

/// Data for the CancelFlightTickets command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelFlightTicketsData {
    /// The flight tickets of the leg being cancelled.
    pub flight_ticket_ids: Vec<FlightTicketId>,
}

// Convenience constructors
impl Command {
    /// Creates a BookShowTickets command.
    pub fn book_show_tickets(
        booking_id: BookingId,
        customer_email: impl Into<String>,
        number_of_tickets: u32,
        show_id: ShowId,
    ) -> Self {
        Command::BookShowTickets(BookShowTicketsData {
            booking_id,
            customer_email: customer_email.into(),
            number_of_tickets,
            show_id,
        })
    }

    /// Creates a BookFlight command with a fresh idempotency key.
    pub fn book_flight(
        customer_email: impl Into<String>,
        flight_id: FlightId,
        passengers: Vec<String>,
        reference_id: BundleId,
    ) -> Self {
        Command::BookFlight(BookFlightData {
            customer_email: customer_email.into(),
            flight_id,
            passengers,
            reference_id,
            idempotency_key: Uuid::new_v4().to_string(),
        })
    }

    /// Creates a BookTaxi command with a fresh idempotency key.
    pub fn book_taxi(
        customer_email: impl Into<String>,
        customer_name: impl Into<String>,
        number_of_passengers: u32,
        reference_id: BundleId,
    ) -> Self {
        Command::BookTaxi(BookTaxiData {
            customer_email: customer_email.into(),
            customer_name: customer_name.into(),
            number_of_passengers,
            reference_id,
            idempotency_key: Uuid::new_v4().to_string(),
        })
    }

    /// Creates a RefundTicket command.
    pub fn refund_ticket(ticket_id: TicketId) -> Self {
        Command::RefundTicket(RefundTicketData { ticket_id })
    }

    /// Creates a CancelFlightTickets command.
    pub fn cancel_flight_tickets(flight_ticket_ids: Vec<FlightTicketId>) -> Self {
        Command::CancelFlightTickets(CancelFlightTicketsData { flight_ticket_ids })
    }
}
