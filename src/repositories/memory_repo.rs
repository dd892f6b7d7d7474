use std::collections::BTreeMap;
use async_trait::async_trait;
use tokio::sync::Mutex;
use crate::errors::StorageError;
use crate::models::reservation::Reservation;
use crate::repositories::ReservationRepo;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, String>,
    last_id: i64,
}

/// Volatile store, contents are lost when the process exits.
#[derive(Default)]
pub struct InMemoryReservationRepo {
    table: Mutex<Table>,
}

impl InMemoryReservationRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationRepo for InMemoryReservationRepo {
    async fn save(&self, reservation: Reservation) -> Result<Reservation, StorageError> {
        let mut table = self.table.lock().await;

        if let Some(id) = reservation.id {
            if let Some(name) = table.rows.get_mut(&id) {
                *name = reservation.reservation_name.clone();
                return Ok(reservation);
            }
        }

        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(id, reservation.reservation_name.clone());

        Ok(Reservation {
            id: Some(id),
            reservation_name: reservation.reservation_name,
        })
    }

    async fn find_all(&self) -> Result<Vec<Reservation>, StorageError> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .iter()
            .map(|(id, name)| Reservation {
                id: Some(*id),
                reservation_name: name.clone(),
            })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, StorageError> {
        let table = self.table.lock().await;
        Ok(table.rows.get(&id).map(|name| Reservation {
            id: Some(id),
            reservation_name: name.clone(),
        }))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StorageError> {
        let mut table = self.table.lock().await;
        Ok(table.rows.remove(&id).is_some())
    }
}
