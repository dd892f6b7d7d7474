use std::sync::Arc;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use bb8_postgres::bb8::Pool;
use bb8_postgres::PostgresConnectionManager;
use bb8_postgres::tokio_postgres::NoTls;
use tracing::info;
use crate::config::{Config, StorageBackend};
use crate::errors::StorageError;
use crate::models::reservation::Reservation;
use crate::repositories::memory_repo::InMemoryReservationRepo;
use crate::repositories::postgres_repo::PostgresConnectionRepo;

pub mod memory_repo;
pub mod postgres_repo;

/// Keyed storage of reservations, ids are always generated by the store.
#[async_trait]
pub trait ReservationRepo: Send + Sync {
    /// Inserts when `id` is unset or unknown, otherwise replaces the stored name.
    async fn save(&self, reservation: Reservation) -> Result<Reservation, StorageError>;

    /// All records ordered by id.
    async fn find_all(&self) -> Result<Vec<Reservation>, StorageError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, StorageError>;

    /// Returns whether a record was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, StorageError>;
}

pub type SharedReservationRepo = Arc<dyn ReservationRepo>;

pub async fn connect(config: &Config) -> anyhow::Result<SharedReservationRepo> {
    match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory reservation storage");
            Ok(Arc::new(InMemoryReservationRepo::new()))
        }
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow!("DATABASE_URL is required when storage is postgres"))?;

            let manager = PostgresConnectionManager::new_from_stringlike(database_url, NoTls)
                .context("Invalid postgres connection string")?;
            let pool = Pool::builder()
                .max_size(config.pool_size())
                .build(manager)
                .await
                .context("Failed to build postgres connection pool")?;
            info!("Connected to postgres with a pool of {} connections", config.pool_size());

            let repo = PostgresConnectionRepo::new(pool);
            repo.ensure_schema()
                .await
                .context("Failed to prepare reservation table")?;
            Ok(Arc::new(repo))
        }
    }
}
