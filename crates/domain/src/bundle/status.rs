//! Derived bundle lifecycle status.

use serde::{Deserialize, Serialize};

/// The lifecycle status of a VIP bundle, derived from its progress markers.
///
/// The status is never stored; it is computed from which markers are set.
///
/// ```text
/// Initialized ──► TicketsBooking ──► TicketsBooked ──► FlightsBooking ──► TaxiBooking ──► Finalized
///      │                │                  │                 │                 │
///      └────────────────┴──────────────────┴─────────────────┴─────────────────┴──► Failed
/// ```
///
/// Because events for the two flight legs carry no ordering guarantee,
/// the inbound and return booking phases are reported as a single
/// `FlightsBooking` status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BundleStatus {
    /// Created; no downstream booking has succeeded yet.
    Initialized,

    /// The show booking succeeded; ticket confirmations are arriving.
    TicketsBooking,

    /// All show tickets are confirmed; no flight booked yet.
    TicketsBooked,

    /// Exactly one flight leg is booked.
    FlightsBooking,

    /// Both flight legs are booked; waiting on the taxi.
    TaxiBooking,

    /// All steps succeeded (terminal).
    Finalized,

    /// The process was rolled back (terminal).
    Failed,
}

impl BundleStatus {
    /// Returns true if this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BundleStatus::Finalized | BundleStatus::Failed)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BundleStatus::Initialized => "Initialized",
            BundleStatus::TicketsBooking => "TicketsBooking",
            BundleStatus::TicketsBooked => "TicketsBooked",
            BundleStatus::FlightsBooking => "FlightsBooking",
            BundleStatus::TaxiBooking => "TaxiBooking",
            BundleStatus::Finalized => "Finalized",
            BundleStatus::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for BundleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(!BundleStatus::Initialized.is_terminal());
        assert!(!BundleStatus::TicketsBooking.is_terminal());
        assert!(!BundleStatus::TicketsBooked.is_terminal());
        assert!(!BundleStatus::FlightsBooking.is_terminal());
        assert!(!BundleStatus::TaxiBooking.is_terminal());
        assert!(BundleStatus::Finalized.is_terminal());
        assert!(BundleStatus::Failed.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(BundleStatus::Initialized.to_string(), "Initialized");
        assert_eq!(BundleStatus::TaxiBooking.to_string(), "TaxiBooking");
        assert_eq!(BundleStatus::Failed.to_string(), "Failed");
    }
}
