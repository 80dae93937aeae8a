//! VIP bundle process initialization.

use bundle_store::VipBundleRepository;
use common::{BookingId, BundleId};
use domain::{FlightId, NewVipBundle, ShowId, VipBundle};
use messaging::{Event, EventBus};

use crate::error::SagaError;

/// A request to book a VIP bundle.
///
/// Identifiers for the new process are generated by the service; the
/// request carries only what the customer asked for.
#[derive(Debug, Clone)]
pub struct VipBundleRequest {
    pub customer_email: String,
    pub number_of_tickets: u32,
    pub show_id: ShowId,
    pub passengers: Vec<String>,
    pub inbound_flight_id: FlightId,
    pub return_flight_id: FlightId,
}

/// Creates new VIP bundle processes.
///
/// Validates the request, persists the new instance, and publishes
/// `VipBundleInitialized` so the process manager picks it up.
pub struct VipBundleService<R, E> {
    repository: R,
    event_bus: E,
}

impl<R, E> VipBundleService<R, E>
where
    R: VipBundleRepository,
    E: EventBus,
{
    /// Creates a new service.
    pub fn new(repository: R, event_bus: E) -> Self {
        Self {
            repository,
            event_bus,
        }
    }

    /// Initializes a new VIP bundle process from a booking request.
    ///
    /// Returns the persisted bundle in its initialized state.
    #[tracing::instrument(skip(self, request), fields(customer_email = %request.customer_email))]
    pub async fn initialize(&self, request: VipBundleRequest) -> Result<VipBundle, SagaError> {
        let bundle = VipBundle::new(NewVipBundle {
            bundle_id: BundleId::new(),
            booking_id: BookingId::new(),
            customer_email: request.customer_email,
            number_of_tickets: request.number_of_tickets,
            show_id: request.show_id,
            passengers: request.passengers,
            inbound_flight_id: request.inbound_flight_id,
            return_flight_id: request.return_flight_id,
        })?;

        self.repository.add(bundle.clone()).await?;
        self.event_bus
            .publish(Event::vip_bundle_initialized(bundle.bundle_id()))
            .await?;

        metrics::counter!("vip_bundles_initialized").increment(1);
        tracing::info!(bundle_id = %bundle.bundle_id(), "vip bundle initialized");

        Ok(bundle)
    }
}
