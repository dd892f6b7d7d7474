use std::io::Write;
use anyhow::Context;
use tracing::info;
use crate::models::reservation::Reservation;
use crate::repositories::ReservationRepo;

pub const SAMPLE_NAMES: [&str; 8] = [
    "Josh", "Juergen", "Andrew", "Bridget",
    "Onsi", "Phil", "Stephane", "Cornelia",
];

/// Inserts the sample reservations, then writes every stored record to `out`.
/// Storage failures are returned untouched so startup aborts on them.
pub async fn run<W: Write>(
    repo: &dyn ReservationRepo,
    out: &mut W,
) -> anyhow::Result<Vec<Reservation>> {
    for name in SAMPLE_NAMES {
        repo.save(Reservation::new(name)).await?;
    }

    let reservations = repo.find_all().await?;
    for reservation in &reservations {
        writeln!(out, "{}", reservation).context("Failed to write seeded reservation")?;
    }
    info!("Seeded {} reservations", SAMPLE_NAMES.len());

    Ok(reservations)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use async_trait::async_trait;
    use crate::errors::StorageError;
    use crate::repositories::memory_repo::InMemoryReservationRepo;
    use super::*;

    struct UnavailableRepo;

    #[async_trait]
    impl ReservationRepo for UnavailableRepo {
        async fn save(&self, _reservation: Reservation) -> Result<Reservation, StorageError> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }

        async fn find_all(&self) -> Result<Vec<Reservation>, StorageError> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<Reservation>, StorageError> {
            Ok(None)
        }

        async fn delete_by_id(&self, _id: i64) -> Result<bool, StorageError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn seeds_eight_distinct_reservations() {
        let repo = InMemoryReservationRepo::new();
        let mut out = Vec::new();

        let seeded = run(&repo, &mut out).await.unwrap();

        assert_eq!(seeded.len(), 8);
        let names: HashSet<&str> = seeded.iter().map(|r| r.reservation_name.as_str()).collect();
        assert_eq!(names, SAMPLE_NAMES.into_iter().collect::<HashSet<_>>());
        let ids: HashSet<i64> = seeded.iter().map(|r| r.id.unwrap()).collect();
        assert_eq!(ids.len(), 8);
        assert_eq!(repo.find_all().await.unwrap(), seeded);
    }

    #[tokio::test]
    async fn prints_one_line_per_reservation_in_insertion_order() {
        let repo = InMemoryReservationRepo::new();
        let mut out = Vec::new();

        run(&repo, &mut out).await.unwrap();

        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 8);

        let mut ids = HashSet::new();
        for (line, name) in lines.iter().zip(SAMPLE_NAMES) {
            let id = line
                .strip_prefix("Reservation{id=")
                .and_then(|rest| rest.strip_suffix(&format!(", reservationName='{}'}}", name)))
                .unwrap_or_else(|| panic!("unexpected line: {}", line));
            assert!(ids.insert(id.parse::<i64>().unwrap()));
        }
    }

    #[tokio::test]
    async fn storage_failure_aborts_seeding() {
        let mut out = Vec::new();

        let err = run(&UnavailableRepo, &mut out).await.unwrap_err();

        assert!(matches!(err.downcast_ref::<StorageError>(), Some(StorageError::Unavailable(_))));
        assert!(out.is_empty());
    }
}
