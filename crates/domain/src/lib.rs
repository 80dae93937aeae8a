//! Domain layer for the VIP bundle system.
//!
//! This crate provides the `VipBundle` aggregate: an invariant-checked
//! process instance tracking a multi-step booking transaction (show
//! tickets, two flights, a taxi) through its progress markers.

pub mod bundle;

pub use bundle::{
    BundleStatus, FlightId, FlightTicketId, NewVipBundle, ShowId, TaxiBookingId, TicketId,
    ValidationError, VipBundle,
};
