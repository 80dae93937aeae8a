//! Event-driven process manager for VIP bundles.

use bundle_store::VipBundleRepository;
use common::BundleId;
use messaging::{
    BookingFailedData, BookingMadeData, Command, CommandBus, Event, EventBus, FlightBookedData,
    FlightBookingFailedData, TaxiBookedData, TaxiBookingFailedData, TicketBookingConfirmedData,
    VipBundleInitializedData,
};

use crate::error::SagaError;

/// Drives a VIP bundle process through its booking steps.
///
/// One handler per event type, dispatched exhaustively over the closed
/// event enum. Every handler re-reads the bundle through the
/// repository's atomic read-modify-write, so concurrent deliveries for
/// the same bundle serialize on the store and duplicates cannot corrupt
/// state. Handlers hold nothing between invocations.
///
/// Business failures arrive as `*Failed` events and route into the
/// rollback path; transport errors from the store or the buses propagate
/// unchanged so the delivery layer can redeliver the event.
pub struct VipBundleProcessManager<R, C, E> {
    repository: R,
    command_bus: C,
    event_bus: E,
}

impl<R, C, E> VipBundleProcessManager<R, C, E>
where
    R: VipBundleRepository,
    C: CommandBus,
    E: EventBus,
{
    /// Creates a new process manager.
    pub fn new(repository: R, command_bus: C, event_bus: E) -> Self {
        Self {
            repository,
            command_bus,
            event_bus,
        }
    }

    /// Handles one incoming event.
    #[tracing::instrument(skip(self, event), fields(event_type = event.event_type()))]
    pub async fn handle(&self, event: Event) -> Result<(), SagaError> {
        metrics::counter!("vip_bundle_events_total").increment(1);

        match event {
            Event::VipBundleInitialized(data) => self.on_initialized(data).await,
            Event::BookingMade(data) => self.on_booking_made(data).await,
            Event::TicketBookingConfirmed(data) => self.on_ticket_booking_confirmed(data).await,
            Event::BookingFailed(data) => self.on_booking_failed(data).await,
            Event::FlightBooked(data) => self.on_flight_booked(data).await,
            Event::FlightBookingFailed(data) => self.on_flight_booking_failed(data).await,
            Event::TaxiBooked(data) => self.on_taxi_booked(data).await,
            Event::TaxiBookingFailed(data) => self.on_taxi_booking_failed(data).await,
            // Published by this process manager; nothing left to do.
            Event::VipBundleFinalized(_) => Ok(()),
        }
    }

    /// Kicks off the first downstream call. No state mutation.
    async fn on_initialized(&self, data: VipBundleInitializedData) -> Result<(), SagaError> {
        let bundle = self.repository.get(data.bundle_id).await?;

        self.command_bus
            .send(Command::book_show_tickets(
                bundle.booking_id(),
                bundle.customer_email(),
                bundle.number_of_tickets(),
                bundle.show_id(),
            ))
            .await?;

        Ok(())
    }

    /// Stamps the show booking and requests the inbound flight.
    ///
    /// Redelivery keeps the first observed timestamp and sends another
    /// `BookFlight` with a fresh idempotency key; the flight service
    /// deduplicates by reference and flight.
    async fn on_booking_made(&self, data: BookingMadeData) -> Result<(), SagaError> {
        let at = data.header.published_at;
        let bundle = self
            .repository
            .update_by_booking_id(data.booking_id, move |mut bundle| {
                bundle.record_booking_made(at);
                Ok(bundle)
            })
            .await?;

        self.command_bus
            .send(Command::book_flight(
                bundle.customer_email(),
                bundle.inbound_flight_id(),
                bundle.passengers().to_vec(),
                bundle.bundle_id(),
            ))
            .await?;

        Ok(())
    }

    /// Accumulates one confirmed ticket. Pure accumulation, no command.
    async fn on_ticket_booking_confirmed(
        &self,
        data: TicketBookingConfirmedData,
    ) -> Result<(), SagaError> {
        self.repository
            .update_by_booking_id(data.booking_id, move |mut bundle| {
                bundle.record_ticket(data.ticket_id);
                Ok(bundle)
            })
            .await?;

        Ok(())
    }

    async fn on_booking_failed(&self, data: BookingFailedData) -> Result<(), SagaError> {
        tracing::warn!(
            booking_id = %data.booking_id,
            reason = %data.failure_reason,
            "show booking failed"
        );

        let bundle = self.repository.get_by_booking_id(data.booking_id).await?;
        self.rollback(bundle.bundle_id()).await
    }

    /// Stamps the booked leg and requests the next step.
    ///
    /// With one leg booked the other is requested; with both booked the
    /// taxi is requested. Legs may complete in either order.
    async fn on_flight_booked(&self, data: FlightBookedData) -> Result<(), SagaError> {
        let at = data.header.published_at;
        let flight_id = data.flight_id;
        let flight_ticket_ids = data.flight_ticket_ids;
        let bundle = self
            .repository
            .update(data.reference_id, move |mut bundle| {
                bundle.record_flight_booked(flight_id, flight_ticket_ids, at);
                Ok(bundle)
            })
            .await?;

        match (bundle.inbound_flight_booked(), bundle.return_flight_booked()) {
            (true, true) => {
                let Some(customer_name) = bundle.passengers().first().cloned() else {
                    return Err(SagaError::InvariantViolation(format!(
                        "bundle {} has no passengers",
                        bundle.bundle_id()
                    )));
                };

                self.command_bus
                    .send(Command::book_taxi(
                        bundle.customer_email(),
                        customer_name,
                        bundle.number_of_tickets(),
                        bundle.bundle_id(),
                    ))
                    .await?;
            }
            (true, false) => {
                self.command_bus
                    .send(Command::book_flight(
                        bundle.customer_email(),
                        bundle.return_flight_id(),
                        bundle.passengers().to_vec(),
                        bundle.bundle_id(),
                    ))
                    .await?;
            }
            (false, true) => {
                self.command_bus
                    .send(Command::book_flight(
                        bundle.customer_email(),
                        bundle.inbound_flight_id(),
                        bundle.passengers().to_vec(),
                        bundle.bundle_id(),
                    ))
                    .await?;
            }
            (false, false) => {
                // The event matched neither leg: the stored instance
                // contradicts the event stream.
                return Err(SagaError::InvariantViolation(format!(
                    "flight {} booked for bundle {} matches neither leg",
                    flight_id,
                    bundle.bundle_id()
                )));
            }
        }

        Ok(())
    }

    async fn on_flight_booking_failed(
        &self,
        data: FlightBookingFailedData,
    ) -> Result<(), SagaError> {
        tracing::warn!(
            bundle_id = %data.reference_id,
            flight_id = %data.flight_id,
            reason = %data.failure_reason,
            "flight booking failed"
        );

        self.rollback(data.reference_id).await
    }

    /// Records the taxi, finalizes the bundle, and announces completion.
    async fn on_taxi_booked(&self, data: TaxiBookedData) -> Result<(), SagaError> {
        let at = data.header.published_at;
        let taxi_booking_id = data.taxi_booking_id;
        let bundle = self
            .repository
            .update(data.reference_id, move |mut bundle| {
                bundle.record_taxi_booked(taxi_booking_id, at);
                Ok(bundle)
            })
            .await?;

        self.event_bus
            .publish(Event::vip_bundle_finalized(bundle.bundle_id()))
            .await?;

        metrics::counter!("vip_bundles_completed").increment(1);
        tracing::info!(bundle_id = %bundle.bundle_id(), "vip bundle finalized");

        Ok(())
    }

    async fn on_taxi_booking_failed(&self, data: TaxiBookingFailedData) -> Result<(), SagaError> {
        tracing::warn!(
            bundle_id = %data.reference_id,
            reason = %data.failure_reason,
            "taxi booking failed"
        );

        self.rollback(data.reference_id).await
    }

    /// Compensates whatever already succeeded, then finalizes the bundle
    /// as failed.
    ///
    /// Compensation commands are sent in a fixed order: one ticket
    /// refund per confirmed ticket, then cancellation of the inbound
    /// leg, then cancellation of the return leg. Each send is fallible
    /// and the first failure halts the remaining steps; redelivery of
    /// the failure event retries the whole rollback.
    ///
    /// Refunds require every ticket confirmation to have arrived. Until
    /// then rollback fails with `IncompleteState` without mutating the
    /// bundle, and a later redelivery completes it.
    #[tracing::instrument(skip(self))]
    async fn rollback(&self, bundle_id: BundleId) -> Result<(), SagaError> {
        let bundle = self.repository.get(bundle_id).await?;

        if bundle.booking_made_at().is_some() {
            if !bundle.all_tickets_confirmed() {
                return Err(SagaError::IncompleteState {
                    expected: bundle.number_of_tickets(),
                    actual: bundle.ticket_ids().len(),
                });
            }
            for ticket_id in bundle.ticket_ids() {
                self.command_bus
                    .send(Command::refund_ticket(*ticket_id))
                    .await?;
            }
        }

        if bundle.inbound_flight_booked() {
            self.command_bus
                .send(Command::cancel_flight_tickets(
                    bundle.inbound_flight_ticket_ids().to_vec(),
                ))
                .await?;
        }

        if bundle.return_flight_booked() {
            self.command_bus
                .send(Command::cancel_flight_tickets(
                    bundle.return_flight_ticket_ids().to_vec(),
                ))
                .await?;
        }

        self.repository
            .update(bundle_id, |mut bundle| {
                bundle.finalize_failed();
                Ok(bundle)
            })
            .await?;

        metrics::counter!("vip_bundles_failed").increment(1);
        tracing::warn!(%bundle_id, "vip bundle rolled back");

        Ok(())
    }
}
