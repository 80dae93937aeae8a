use async_trait::async_trait;
use common::{BookingId, BundleId};
use domain::VipBundle;
use sqlx::{PgPool, Row};

use crate::{Result, StoreError, repository::VipBundleRepository};

/// PostgreSQL-backed bundle repository.
///
/// Each bundle is stored as its JSON form in a JSONB column. Updates run
/// `SELECT ... FOR UPDATE` inside a transaction, so updates to the same
/// bundle serialize on the row lock while other rows stay unaffected.
#[derive(Clone)]
pub struct PostgresVipBundleRepository {
    pool: PgPool,
}

impl PostgresVipBundleRepository {
    /// Creates a new PostgreSQL bundle repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }
}

#[async_trait]
impl VipBundleRepository for PostgresVipBundleRepository {
    async fn add(&self, bundle: VipBundle) -> Result<()> {
        let payload = serde_json::to_value(&bundle)?;

        sqlx::query(
            r#"
            INSERT INTO vip_bundles (vip_bundle_id, booking_id, payload)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(bundle.bundle_id().as_uuid())
        .bind(bundle.booking_id().as_uuid())
        .bind(&payload)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return StoreError::AlreadyExists(bundle.bundle_id());
            }
            StoreError::Database(e)
        })?;

        Ok(())
    }

    async fn get(&self, bundle_id: BundleId) -> Result<VipBundle> {
        let row = sqlx::query("SELECT payload FROM vip_bundles WHERE vip_bundle_id = $1")
            .bind(bundle_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(bundle_id))?;

        let payload: serde_json::Value = row.try_get("payload")?;
        Ok(serde_json::from_value(payload)?)
    }

    async fn get_by_booking_id(&self, booking_id: BookingId) -> Result<VipBundle> {
        let row = sqlx::query("SELECT payload FROM vip_bundles WHERE booking_id = $1")
            .bind(booking_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::BookingNotFound(booking_id))?;

        let payload: serde_json::Value = row.try_get("payload")?;
        Ok(serde_json::from_value(payload)?)
    }

    async fn update<F>(&self, bundle_id: BundleId, mutate: F) -> Result<VipBundle>
    where
        F: FnOnce(VipBundle) -> Result<VipBundle> + Send + 'static,
    {
        let mut tx = self.pool.begin().await?;

        let row =
            sqlx::query("SELECT payload FROM vip_bundles WHERE vip_bundle_id = $1 FOR UPDATE")
                .bind(bundle_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(StoreError::NotFound(bundle_id))?;

        let payload: serde_json::Value = row.try_get("payload")?;
        let bundle: VipBundle = serde_json::from_value(payload)?;

        // A failing mutation drops the transaction; nothing is persisted.
        let updated = mutate(bundle)?;
        let payload = serde_json::to_value(&updated)?;

        sqlx::query(
            "UPDATE vip_bundles SET payload = $2, updated_at = now() WHERE vip_bundle_id = $1",
        )
        .bind(bundle_id.as_uuid())
        .bind(&payload)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn update_by_booking_id<F>(&self, booking_id: BookingId, mutate: F) -> Result<VipBundle>
    where
        F: FnOnce(VipBundle) -> Result<VipBundle> + Send + 'static,
    {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT payload FROM vip_bundles WHERE booking_id = $1 FOR UPDATE")
            .bind(booking_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::BookingNotFound(booking_id))?;

        let payload: serde_json::Value = row.try_get("payload")?;
        let bundle: VipBundle = serde_json::from_value(payload)?;

        let updated = mutate(bundle)?;
        let payload = serde_json::to_value(&updated)?;

        sqlx::query("UPDATE vip_bundles SET payload = $2, updated_at = now() WHERE booking_id = $1")
            .bind(booking_id.as_uuid())
            .bind(&payload)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }
}
