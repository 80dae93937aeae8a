//! Domain events observed and published by the process manager.

use chrono::{DateTime, Utc};
use common::{BookingId, BundleId};
use domain::{FlightId, FlightTicketId, TaxiBookingId, TicketId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Header carried by every event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventHeader {
    /// Unique event ID.
    pub event_id: Uuid,
    /// When the event was published.
    pub published_at: DateTime<Utc>,
}

impl EventHeader {
    /// Creates a header with a fresh ID and the current time.
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            published_at: Utc::now(),
        }
    }
}

impl Default for EventHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Events flowing through the event bus.
///
/// Delivery is at-least-once with no ordering guarantee between event
/// types, even for the same bundle. Events are routed back to a bundle
/// by `booking_id` (ticket sub-flow) or `reference_id` (flight and taxi
/// sub-flows).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// A new bundle process was created and persisted.
    VipBundleInitialized(VipBundleInitializedData),

    /// The show booking succeeded.
    BookingMade(BookingMadeData),

    /// One show ticket was confirmed. Emitted once per ticket.
    TicketBookingConfirmed(TicketBookingConfirmedData),

    /// The show booking failed.
    BookingFailed(BookingFailedData),

    /// One flight leg was booked.
    FlightBooked(FlightBookedData),

    /// A flight booking failed.
    FlightBookingFailed(FlightBookingFailedData),

    /// The taxi was booked.
    TaxiBooked(TaxiBookedData),

    /// The taxi booking failed.
    TaxiBookingFailed(TaxiBookingFailedData),

    /// The whole bundle completed successfully.
    VipBundleFinalized(VipBundleFinalizedData),
}

impl Event {
    /// Returns the event name as a static string.
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::VipBundleInitialized(_) => "VipBundleInitialized",
            Event::BookingMade(_) => "BookingMade",
            Event::TicketBookingConfirmed(_) => "TicketBookingConfirmed",
            Event::BookingFailed(_) => "BookingFailed",
            Event::FlightBooked(_) => "FlightBooked",
            Event::FlightBookingFailed(_) => "FlightBookingFailed",
            Event::TaxiBooked(_) => "TaxiBooked",
            Event::TaxiBookingFailed(_) => "TaxiBookingFailed",
            Event::VipBundleFinalized(_) => "VipBundleFinalized",
        }
    }

    /// Returns the event header.
    pub fn header(&self) -> &EventHeader {
        match self {
            Event::VipBundleInitialized(data) => &data.header,
            Event::BookingMade(data) => &data.header,
            Event::TicketBookingConfirmed(data) => &data.header,
            Event::BookingFailed(data) => &data.header,
            Event::FlightBooked(data) => &data.header,
            Event::FlightBookingFailed(data) => &data.header,
            Event::TaxiBooked(data) => &data.header,
            Event::TaxiBookingFailed(data) => &data.header,
            Event::VipBundleFinalized(data) => &data.header,
        }
    }
}

/// Data for the VipBundleInitialized event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VipBundleInitializedData {
    pub header: EventHeader,
    pub bundle_id: BundleId,
}

/// Data for the BookingMade event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingMadeData {
    pub header: EventHeader,
    pub booking_id: BookingId,
}

/// Data for the TicketBookingConfirmed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketBookingConfirmedData {
    pub header: EventHeader,
    pub booking_id: BookingId,
    pub ticket_id: TicketId,
}

/// Data for the BookingFailed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingFailedData {
    pub header: EventHeader,
    pub booking_id: BookingId,
    pub failure_reason: String,
}

/// Data for the FlightBooked event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightBookedData {
    pub header: EventHeader,
    pub flight_id: FlightId,
    pub flight_ticket_ids: Vec<FlightTicketId>,
    pub reference_id: BundleId,
}

/// Data for the FlightBookingFailed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightBookingFailedData {
    pub header: EventHeader,
    pub flight_id: FlightId,
    pub reference_id: BundleId,
    pub failure_reason: String,
}

/// Data for the TaxiBooked event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxiBookedData {
    pub header: EventHeader,
    pub taxi_booking_id: TaxiBookingId,
    pub reference_id: BundleId,
}

/// Data for the TaxiBookingFailed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxiBookingFailedData {
    pub header: EventHeader,
    pub reference_id: BundleId,
    pub failure_reason: String,
}

/// Data for the VipBundleFinalized event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VipBundleFinalizedData {
    pub header: EventHeader,
    pub bundle_id: BundleId,
}

// Convenience constructors
impl Event {
    /// Creates a VipBundleInitialized event.
    pub fn vip_bundle_initialized(bundle_id: BundleId) -> Self {
        Event::VipBundleInitialized(VipBundleInitializedData {
            header: EventHeader::new(),
            bundle_id,
        })
    }

    /// Creates a BookingMade event.
    pub fn booking_made(booking_id: BookingId) -> Self {
        Event::BookingMade(BookingMadeData {
            header: EventHeader::new(),
            booking_id,
        })
    }

    /// Creates a TicketBookingConfirmed event.
    pub fn ticket_booking_confirmed(booking_id: BookingId, ticket_id: TicketId) -> Self {
        Event::TicketBookingConfirmed(TicketBookingConfirmedData {
            header: EventHeader::new(),
            booking_id,
            ticket_id,
        })
    }

    /// Creates a BookingFailed event.
    pub fn booking_failed(booking_id: BookingId, failure_reason: impl Into<String>) -> Self {
        Event::BookingFailed(BookingFailedData {
            header: EventHeader::new(),
            booking_id,
            failure_reason: failure_reason.into(),
        })
    }

    /// Creates a FlightBooked event.
    pub fn flight_booked(
        flight_id: FlightId,
        flight_ticket_ids: Vec<FlightTicketId>,
        reference_id: BundleId,
    ) -> Self {
        Event::FlightBooked(FlightBookedData {
            header: EventHeader::new(),
            flight_id,
            flight_ticket_ids,
            reference_id,
        })
    }

    /// Creates a FlightBookingFailed event.
    pub fn flight_booking_failed(
        flight_id: FlightId,
        reference_id: BundleId,
        failure_reason: impl Into<String>,
    ) -> Self {
        Event::FlightBookingFailed(FlightBookingFailedData {
            header: EventHeader::new(),
            flight_id,
            reference_id,
            failure_reason: failure_reason.into(),
        })
    }

    /// Creates a TaxiBooked event.
    pub fn taxi_booked(taxi_booking_id: TaxiBookingId, reference_id: BundleId) -> Self {
        Event::TaxiBooked(TaxiBookedData {
            header: EventHeader::new(),
            taxi_booking_id,
            reference_id,
        })
    }

    /// Creates a TaxiBookingFailed event.
    pub fn taxi_booking_failed(
        reference_id: BundleId,
        failure_reason: impl Into<String>,
    ) -> Self {
        Event::TaxiBookingFailed(TaxiBookingFailedData {
            header: EventHeader::new(),
            reference_id,
            failure_reason: failure_reason.into(),
        })
    }

    /// Creates a VipBundleFinalized event.
    pub fn vip_bundle_finalized(bundle_id: BundleId) -> Self {
        Event::VipBundleFinalized(VipBundleFinalizedData {
            header: EventHeader::new(),
            bundle_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type() {
        assert_eq!(
            Event::vip_bundle_initialized(BundleId::new()).event_type(),
            "VipBundleInitialized"
        );
        assert_eq!(
            Event::booking_made(BookingId::new()).event_type(),
            "BookingMade"
        );
        assert_eq!(
            Event::ticket_booking_confirmed(BookingId::new(), TicketId::new()).event_type(),
            "TicketBookingConfirmed"
        );
        assert_eq!(
            Event::booking_failed(BookingId::new(), "sold out").event_type(),
            "BookingFailed"
        );
        assert_eq!(
            Event::flight_booked(FlightId::new(), vec![], BundleId::new()).event_type(),
            "FlightBooked"
        );
        assert_eq!(
            Event::flight_booking_failed(FlightId::new(), BundleId::new(), "full").event_type(),
            "FlightBookingFailed"
        );
        assert_eq!(
            Event::taxi_booked(TaxiBookingId::new(), BundleId::new()).event_type(),
            "TaxiBooked"
        );
        assert_eq!(
            Event::taxi_booking_failed(BundleId::new(), "no driver").event_type(),
            "TaxiBookingFailed"
        );
        assert_eq!(
            Event::vip_bundle_finalized(BundleId::new()).event_type(),
            "VipBundleFinalized"
        );
    }

    #[test]
    fn test_headers_are_unique() {
        let bundle_id = BundleId::new();
        let first = Event::vip_bundle_initialized(bundle_id);
        let second = Event::vip_bundle_initialized(bundle_id);
        assert_ne!(first.header().event_id, second.header().event_id);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let events = vec![
            Event::vip_bundle_initialized(BundleId::new()),
            Event::booking_made(BookingId::new()),
            Event::ticket_booking_confirmed(BookingId::new(), TicketId::new()),
            Event::booking_failed(BookingId::new(), "sold out"),
            Event::flight_booked(
                FlightId::new(),
                vec![FlightTicketId::new()],
                BundleId::new(),
            ),
            Event::flight_booking_failed(FlightId::new(), BundleId::new(), "overbooked"),
            Event::taxi_booked(TaxiBookingId::new(), BundleId::new()),
            Event::taxi_booking_failed(BundleId::new(), "no driver"),
            Event::vip_bundle_finalized(BundleId::new()),
        ];

        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let deserialized: Event = serde_json::from_str(&json).unwrap();
            assert_eq!(event, deserialized);
        }
    }
}
