//! VIP bundle aggregate implementation.

use chrono::{DateTime, Utc};
use common::{BookingId, BundleId};
use serde::{Deserialize, Serialize};

use super::{
    BundleStatus, FlightId, FlightTicketId, ShowId, TaxiBookingId, TicketId, ValidationError,
};

/// Candidate values for a new VIP bundle, validated by [`VipBundle::new`].
#[derive(Debug, Clone)]
pub struct NewVipBundle {
    pub bundle_id: BundleId,
    pub booking_id: BookingId,
    pub customer_email: String,
    pub number_of_tickets: u32,
    pub show_id: ShowId,
    pub passengers: Vec<String>,
    pub inbound_flight_id: FlightId,
    pub return_flight_id: FlightId,
}

/// VIP bundle aggregate root.
///
/// Tracks one cross-service booking transaction: show tickets, an inbound
/// and a return flight, and a taxi. Each progress marker stays unset until
/// the corresponding success event is observed. Once `is_finalized` is set
/// the instance accepts no further transitions.
///
/// Mutation happens exclusively through the repository's atomic
/// read-modify-write; the helpers here are called from inside update
/// closures and never persist anything themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VipBundle {
    bundle_id: BundleId,
    booking_id: BookingId,
    customer_email: String,
    number_of_tickets: u32,
    show_id: ShowId,
    passengers: Vec<String>,

    booking_made_at: Option<DateTime<Utc>>,
    ticket_ids: Vec<TicketId>,

    inbound_flight_id: FlightId,
    inbound_flight_booked_at: Option<DateTime<Utc>>,
    inbound_flight_ticket_ids: Vec<FlightTicketId>,

    return_flight_id: FlightId,
    return_flight_booked_at: Option<DateTime<Utc>>,
    return_flight_ticket_ids: Vec<FlightTicketId>,

    taxi_booked_at: Option<DateTime<Utc>>,
    taxi_booking_id: Option<TaxiBookingId>,

    is_finalized: bool,
    failed: bool,
}

impl VipBundle {
    /// Validates the candidate and returns a new bundle in the initialized
    /// state (all progress markers unset).
    ///
    /// Invariants are checked in a fixed order and the first violation is
    /// reported. Pure; no side effects.
    pub fn new(candidate: NewVipBundle) -> Result<Self, ValidationError> {
        if candidate.bundle_id.is_nil() {
            return Err(ValidationError::MissingBundleId);
        }
        if candidate.booking_id.is_nil() {
            return Err(ValidationError::MissingBookingId);
        }
        if candidate.customer_email.is_empty() {
            return Err(ValidationError::MissingCustomerEmail);
        }
        if candidate.number_of_tickets == 0 {
            return Err(ValidationError::InvalidNumberOfTickets);
        }
        if candidate.show_id.is_nil() {
            return Err(ValidationError::MissingShowId);
        }
        if candidate.passengers.len() != candidate.number_of_tickets as usize {
            return Err(ValidationError::PassengerCountMismatch {
                number_of_tickets: candidate.number_of_tickets,
                passengers: candidate.passengers.len(),
            });
        }
        if candidate.inbound_flight_id.is_nil() {
            return Err(ValidationError::MissingInboundFlightId);
        }
        if candidate.return_flight_id.is_nil() {
            return Err(ValidationError::MissingReturnFlightId);
        }

        Ok(Self {
            bundle_id: candidate.bundle_id,
            booking_id: candidate.booking_id,
            customer_email: candidate.customer_email,
            number_of_tickets: candidate.number_of_tickets,
            show_id: candidate.show_id,
            passengers: candidate.passengers,
            booking_made_at: None,
            ticket_ids: Vec::new(),
            inbound_flight_id: candidate.inbound_flight_id,
            inbound_flight_booked_at: None,
            inbound_flight_ticket_ids: Vec::new(),
            return_flight_id: candidate.return_flight_id,
            return_flight_booked_at: None,
            return_flight_ticket_ids: Vec::new(),
            taxi_booked_at: None,
            taxi_booking_id: None,
            is_finalized: false,
            failed: false,
        })
    }
}

// Query methods
impl VipBundle {
    /// Returns the bundle ID.
    pub fn bundle_id(&self) -> BundleId {
        self.bundle_id
    }

    /// Returns the correlated show booking ID.
    pub fn booking_id(&self) -> BookingId {
        self.booking_id
    }

    /// Returns the customer email.
    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    /// Returns the number of show tickets requested.
    pub fn number_of_tickets(&self) -> u32 {
        self.number_of_tickets
    }

    /// Returns the show ID.
    pub fn show_id(&self) -> ShowId {
        self.show_id
    }

    /// Returns the passengers, in request order.
    pub fn passengers(&self) -> &[String] {
        &self.passengers
    }

    /// Returns when the show booking was made, if it was.
    pub fn booking_made_at(&self) -> Option<DateTime<Utc>> {
        self.booking_made_at
    }

    /// Returns the confirmed show ticket IDs.
    pub fn ticket_ids(&self) -> &[TicketId] {
        &self.ticket_ids
    }

    /// Returns true if every requested show ticket has been confirmed.
    pub fn all_tickets_confirmed(&self) -> bool {
        self.ticket_ids.len() == self.number_of_tickets as usize
    }

    /// Returns the inbound flight ID.
    pub fn inbound_flight_id(&self) -> FlightId {
        self.inbound_flight_id
    }

    /// Returns true if the inbound leg is booked.
    pub fn inbound_flight_booked(&self) -> bool {
        self.inbound_flight_booked_at.is_some()
    }

    /// Returns the inbound leg's flight ticket IDs.
    pub fn inbound_flight_ticket_ids(&self) -> &[FlightTicketId] {
        &self.inbound_flight_ticket_ids
    }

    /// Returns the return flight ID.
    pub fn return_flight_id(&self) -> FlightId {
        self.return_flight_id
    }

    /// Returns true if the return leg is booked.
    pub fn return_flight_booked(&self) -> bool {
        self.return_flight_booked_at.is_some()
    }

    /// Returns the return leg's flight ticket IDs.
    pub fn return_flight_ticket_ids(&self) -> &[FlightTicketId] {
        &self.return_flight_ticket_ids
    }

    /// Returns when the taxi was booked, if it was.
    pub fn taxi_booked_at(&self) -> Option<DateTime<Utc>> {
        self.taxi_booked_at
    }

    /// Returns the taxi booking ID, if set.
    pub fn taxi_booking_id(&self) -> Option<TaxiBookingId> {
        self.taxi_booking_id
    }

    /// Returns true if the process accepts no further transitions.
    pub fn is_finalized(&self) -> bool {
        self.is_finalized
    }

    /// Returns true if the process was rolled back.
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Derives the lifecycle status from the progress markers.
    pub fn status(&self) -> BundleStatus {
        if self.failed {
            return BundleStatus::Failed;
        }
        if self.is_finalized {
            return BundleStatus::Finalized;
        }

        let inbound = self.inbound_flight_booked_at.is_some();
        let ret = self.return_flight_booked_at.is_some();
        if inbound && ret {
            return BundleStatus::TaxiBooking;
        }
        if inbound || ret {
            return BundleStatus::FlightsBooking;
        }

        match self.booking_made_at {
            Some(_) if self.all_tickets_confirmed() => BundleStatus::TicketsBooked,
            Some(_) => BundleStatus::TicketsBooking,
            None => BundleStatus::Initialized,
        }
    }
}

// Mutation helpers, applied inside repository update closures.
impl VipBundle {
    /// Records that the show booking was made. Setting an already-set
    /// marker is a no-op; the first observed timestamp wins.
    pub fn record_booking_made(&mut self, at: DateTime<Utc>) {
        if self.booking_made_at.is_none() {
            self.booking_made_at = Some(at);
        }
    }

    /// Records one confirmed show ticket. Duplicate deliveries of the same
    /// ticket ID leave the set unchanged.
    pub fn record_ticket(&mut self, ticket_id: TicketId) {
        if !self.ticket_ids.contains(&ticket_id) {
            self.ticket_ids.push(ticket_id);
        }
    }

    /// Records a booked flight by stamping whichever leg matches the
    /// flight ID. A flight matching neither leg stamps nothing; callers
    /// detect that case from the markers.
    pub fn record_flight_booked(
        &mut self,
        flight_id: FlightId,
        ticket_ids: Vec<FlightTicketId>,
        at: DateTime<Utc>,
    ) {
        if self.inbound_flight_id == flight_id {
            self.inbound_flight_booked_at = Some(at);
            self.inbound_flight_ticket_ids = ticket_ids.clone();
        }
        if self.return_flight_id == flight_id {
            self.return_flight_booked_at = Some(at);
            self.return_flight_ticket_ids = ticket_ids;
        }
    }

    /// Records the booked taxi and finalizes the process successfully.
    pub fn record_taxi_booked(&mut self, taxi_booking_id: TaxiBookingId, at: DateTime<Utc>) {
        self.taxi_booked_at = Some(at);
        self.taxi_booking_id = Some(taxi_booking_id);
        self.is_finalized = true;
    }

    /// Finalizes the process as failed after compensation.
    pub fn finalize_failed(&mut self) {
        self.is_finalized = true;
        self.failed = true;
    }
}
