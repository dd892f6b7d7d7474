use async_trait::async_trait;
use bb8_postgres::bb8::{Pool, PooledConnection};
use bb8_postgres::PostgresConnectionManager;
use bb8_postgres::tokio_postgres::{NoTls, Row};
use tracing::warn;
use crate::errors::StorageError;
use crate::models::reservation::Reservation;
use crate::repositories::ReservationRepo;

pub struct PostgresConnectionRepo {
    postgres_connection: Pool<PostgresConnectionManager<NoTls>>,
}

impl PostgresConnectionRepo {
    pub fn new(
        postgres_connection: Pool<PostgresConnectionManager<NoTls>>,
    ) -> Self {
        Self {
            postgres_connection
        }
    }

    async fn get_postgres_connection(
        &self,
    ) -> Result<PooledConnection<'_, PostgresConnectionManager<NoTls>>, StorageError> {
        self.postgres_connection.get().await.map_err(|e| {
            warn!("Failed to retrieve postgres connection due to: {}", e);
            StorageError::from(e)
        })
    }

    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        let conn = self.get_postgres_connection().await?;
        conn.batch_execute(
            "CREATE TABLE IF NOT EXISTS reservation (\
                id BIGSERIAL PRIMARY KEY, \
                reservation_name TEXT NOT NULL\
            );"
        ).await?;
        Ok(())
    }

    async fn insert_reservation(
        &self,
        reservation_name: &str,
    ) -> Result<Reservation, StorageError> {
        let conn = self.get_postgres_connection().await?;
        let row = conn
            .query_one(
                "INSERT INTO reservation (reservation_name) VALUES ($1) RETURNING id, reservation_name;",
                &[&reservation_name],
            )
            .await?;

        parse_row_into_reservation(&row)
    }

    async fn update_reservation(
        &self,
        id: i64,
        reservation_name: &str,
    ) -> Result<Option<Reservation>, StorageError> {
        let conn = self.get_postgres_connection().await?;
        let row = conn
            .query_opt(
                "UPDATE reservation SET reservation_name = $1 WHERE id = $2 RETURNING id, reservation_name;",
                &[&reservation_name, &id],
            )
            .await?;

        row.as_ref().map(parse_row_into_reservation).transpose()
    }
}

#[async_trait]
impl ReservationRepo for PostgresConnectionRepo {
    async fn save(&self, reservation: Reservation) -> Result<Reservation, StorageError> {
        if let Some(id) = reservation.id {
            if let Some(updated) = self.update_reservation(id, &reservation.reservation_name).await? {
                return Ok(updated);
            }
        }

        self.insert_reservation(&reservation.reservation_name).await
    }

    async fn find_all(&self) -> Result<Vec<Reservation>, StorageError> {
        let conn = self.get_postgres_connection().await?;
        let rows = conn
            .query("SELECT id, reservation_name FROM reservation ORDER BY id;", &[])
            .await?;

        rows.iter().map(parse_row_into_reservation).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, StorageError> {
        let conn = self.get_postgres_connection().await?;
        let row = conn
            .query_opt(
                "SELECT id, reservation_name FROM reservation WHERE id = $1;",
                &[&id],
            )
            .await?;

        row.as_ref().map(parse_row_into_reservation).transpose()
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StorageError> {
        let conn = self.get_postgres_connection().await?;
        let deleted = conn
            .execute("DELETE FROM reservation WHERE id = $1;", &[&id])
            .await?;

        Ok(deleted > 0)
    }
}

fn parse_row_into_reservation(
    row: &Row,
) -> Result<Reservation, StorageError> {
    Ok(Reservation {
        id: Some(row.try_get::<&str, i64>("id")?),
        reservation_name: row.try_get("reservation_name")?,
    })
}
