use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{BookingId, BundleId};
use domain::VipBundle;
use tokio::sync::{Mutex, RwLock};

use crate::{Result, StoreError, repository::VipBundleRepository};

/// In-memory bundle repository for testing.
///
/// Each bundle lives behind its own lock, so updates to the same bundle
/// serialize while updates to different bundles run concurrently. This
/// implementation provides the same interface as the PostgreSQL one.
#[derive(Clone, Default)]
pub struct InMemoryVipBundleRepository {
    bundles: Arc<RwLock<HashMap<BundleId, Arc<Mutex<VipBundle>>>>>,
    booking_index: Arc<RwLock<HashMap<BookingId, BundleId>>>,
}

impl InMemoryVipBundleRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored bundles.
    pub async fn bundle_count(&self) -> usize {
        self.bundles.read().await.len()
    }

    async fn entry(&self, bundle_id: BundleId) -> Result<Arc<Mutex<VipBundle>>> {
        self.bundles
            .read()
            .await
            .get(&bundle_id)
            .cloned()
            .ok_or(StoreError::NotFound(bundle_id))
    }

    async fn resolve_booking(&self, booking_id: BookingId) -> Result<BundleId> {
        self.booking_index
            .read()
            .await
            .get(&booking_id)
            .copied()
            .ok_or(StoreError::BookingNotFound(booking_id))
    }

    async fn apply<F>(&self, bundle_id: BundleId, mutate: F) -> Result<VipBundle>
    where
        F: FnOnce(VipBundle) -> Result<VipBundle>,
    {
        let entry = self.entry(bundle_id).await?;
        let mut current = entry.lock().await;
        let updated = mutate(current.clone())?;
        *current = updated.clone();
        Ok(updated)
    }
}

#[async_trait]
impl VipBundleRepository for InMemoryVipBundleRepository {
    async fn add(&self, bundle: VipBundle) -> Result<()> {
        let mut bundles = self.bundles.write().await;

        if bundles.contains_key(&bundle.bundle_id()) {
            return Err(StoreError::AlreadyExists(bundle.bundle_id()));
        }

        self.booking_index
            .write()
            .await
            .insert(bundle.booking_id(), bundle.bundle_id());
        bundles.insert(bundle.bundle_id(), Arc::new(Mutex::new(bundle)));

        Ok(())
    }

    async fn get(&self, bundle_id: BundleId) -> Result<VipBundle> {
        let entry = self.entry(bundle_id).await?;
        let bundle = entry.lock().await;
        Ok(bundle.clone())
    }

    async fn get_by_booking_id(&self, booking_id: BookingId) -> Result<VipBundle> {
        let bundle_id = self.resolve_booking(booking_id).await?;
        self.get(bundle_id).await
    }

    async fn update<F>(&self, bundle_id: BundleId, mutate: F) -> Result<VipBundle>
    where
        F: FnOnce(VipBundle) -> Result<VipBundle> + Send + 'static,
    {
        self.apply(bundle_id, mutate).await
    }

    async fn update_by_booking_id<F>(&self, booking_id: BookingId, mutate: F) -> Result<VipBundle>
    where
        F: FnOnce(VipBundle) -> Result<VipBundle> + Send + 'static,
    {
        let bundle_id = self.resolve_booking(booking_id).await?;
        self.apply(bundle_id, mutate).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::{FlightId, NewVipBundle, ShowId, TicketId};

    fn make_bundle(number_of_tickets: u32) -> VipBundle {
        VipBundle::new(NewVipBundle {
            bundle_id: BundleId::new(),
            booking_id: BookingId::new(),
            customer_email: "customer@example.com".to_string(),
            number_of_tickets,
            show_id: ShowId::new(),
            passengers: (0..number_of_tickets)
                .map(|i| format!("Passenger {}", i))
                .collect(),
            inbound_flight_id: FlightId::new(),
            return_flight_id: FlightId::new(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn add_and_get() {
        let repo = InMemoryVipBundleRepository::new();
        let bundle = make_bundle(2);

        repo.add(bundle.clone()).await.unwrap();

        let stored = repo.get(bundle.bundle_id()).await.unwrap();
        assert_eq!(stored, bundle);
        assert_eq!(repo.bundle_count().await, 1);
    }

    #[tokio::test]
    async fn add_duplicate_fails() {
        let repo = InMemoryVipBundleRepository::new();
        let bundle = make_bundle(1);

        repo.add(bundle.clone()).await.unwrap();
        let result = repo.add(bundle.clone()).await;

        assert!(matches!(
            result,
            Err(StoreError::AlreadyExists(id)) if id == bundle.bundle_id()
        ));
    }

    #[tokio::test]
    async fn get_missing_fails() {
        let repo = InMemoryVipBundleRepository::new();
        let result = repo.get(BundleId::new()).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn get_by_booking_id() {
        let repo = InMemoryVipBundleRepository::new();
        let bundle = make_bundle(2);
        repo.add(bundle.clone()).await.unwrap();

        let stored = repo.get_by_booking_id(bundle.booking_id()).await.unwrap();
        assert_eq!(stored.bundle_id(), bundle.bundle_id());

        let result = repo.get_by_booking_id(BookingId::new()).await;
        assert!(matches!(result, Err(StoreError::BookingNotFound(_))));
    }

    #[tokio::test]
    async fn update_persists_mutation() {
        let repo = InMemoryVipBundleRepository::new();
        let bundle = make_bundle(2);
        let bundle_id = bundle.bundle_id();
        repo.add(bundle).await.unwrap();

        let ticket = TicketId::new();
        let updated = repo
            .update(bundle_id, move |mut bundle| {
                bundle.record_booking_made(Utc::now());
                bundle.record_ticket(ticket);
                Ok(bundle)
            })
            .await
            .unwrap();

        assert_eq!(updated.ticket_ids(), &[ticket]);

        let stored = repo.get(bundle_id).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn update_by_booking_id_persists_mutation() {
        let repo = InMemoryVipBundleRepository::new();
        let bundle = make_bundle(2);
        repo.add(bundle.clone()).await.unwrap();

        let updated = repo
            .update_by_booking_id(bundle.booking_id(), |mut bundle| {
                bundle.record_booking_made(Utc::now());
                Ok(bundle)
            })
            .await
            .unwrap();

        assert!(updated.booking_made_at().is_some());
        let stored = repo.get(bundle.bundle_id()).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn rejected_update_persists_nothing() {
        let repo = InMemoryVipBundleRepository::new();
        let bundle = make_bundle(1);
        let bundle_id = bundle.bundle_id();
        repo.add(bundle.clone()).await.unwrap();

        let result = repo
            .update(bundle_id, |_| {
                Err(StoreError::UpdateRejected("mutation refused".to_string()))
            })
            .await;

        assert!(matches!(result, Err(StoreError::UpdateRejected(_))));
        let stored = repo.get(bundle_id).await.unwrap();
        assert_eq!(stored, bundle);
    }

    #[tokio::test]
    async fn update_missing_fails() {
        let repo = InMemoryVipBundleRepository::new();
        let result = repo.update(BundleId::new(), Ok).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn concurrent_updates_lose_nothing() {
        let repo = InMemoryVipBundleRepository::new();
        let bundle = make_bundle(16);
        let bundle_id = bundle.bundle_id();
        repo.add(bundle).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let repo = repo.clone();
            let ticket = TicketId::new();
            handles.push(tokio::spawn(async move {
                repo.update(bundle_id, move |mut bundle| {
                    bundle.record_ticket(ticket);
                    Ok(bundle)
                })
                .await
                .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stored = repo.get(bundle_id).await.unwrap();
        assert_eq!(stored.ticket_ids().len(), 16);
        assert!(stored.all_tickets_confirmed());
    }

    #[tokio::test]
    async fn updates_to_different_bundles_interleave() {
        let repo = InMemoryVipBundleRepository::new();
        let first = make_bundle(4);
        let second = make_bundle(4);
        repo.add(first.clone()).await.unwrap();
        repo.add(second.clone()).await.unwrap();

        let mut handles = Vec::new();
        for bundle_id in [first.bundle_id(), second.bundle_id()] {
            for _ in 0..4 {
                let repo = repo.clone();
                let ticket = TicketId::new();
                handles.push(tokio::spawn(async move {
                    repo.update(bundle_id, move |mut bundle| {
                        bundle.record_ticket(ticket);
                        Ok(bundle)
                    })
                    .await
                    .unwrap();
                }));
            }
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(repo.get(first.bundle_id()).await.unwrap().all_tickets_confirmed());
        assert!(repo.get(second.bundle_id()).await.unwrap().all_tickets_confirmed());
    }
}
