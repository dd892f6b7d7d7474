use axum::{Extension, Json, Router};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;
use crate::errors::StorageError;
use crate::models::reservation::Reservation;
use crate::repositories::SharedReservationRepo;

pub fn router(repo: SharedReservationRepo) -> Router {
    Router::new()
        .route("/", get(get_all_reservations).post(add_reservation))
        .route(
            "/:id",
            get(get_reservation)
                .put(replace_reservation)
                .delete(delete_reservation),
        )
        .route_layer(Extension(repo))
}

fn storage_failure(action: &str, e: StorageError) -> axum::response::Response {
    warn!("Something went wrong {} due to: {}", action, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": format!("Failed {}, please try again.", action)})),
    ).into_response()
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct PageQuery {
    /// Zero based, ignored unless `size` is given
    pub page: Option<usize>,
    pub size: Option<usize>,
}

pub async fn get_all_reservations(
    Extension(repo): Extension<SharedReservationRepo>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    if query.size == Some(0) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Page size must be greater than zero"})),
        ).into_response();
    }

    match repo.find_all().await {
        Ok(reservations) => {
            let reservations: Vec<Reservation> = match query.size {
                Some(size) => reservations
                    .into_iter()
                    .skip(query.page.unwrap_or(0).saturating_mul(size))
                    .take(size)
                    .collect(),
                None => reservations,
            };
            (StatusCode::OK, Json(reservations)).into_response()
        }
        Err(e) => storage_failure("retrieving reservations", e),
    }
}

pub async fn get_reservation(
    Extension(repo): Extension<SharedReservationRepo>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match repo.find_by_id(id).await {
        Ok(Some(reservation)) => (StatusCode::OK, Json(reservation)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": format!("No reservation with id {}", id)})),
        ).into_response(),
        Err(e) => storage_failure("retrieving reservation", e),
    }
}

pub async fn add_reservation(
    Extension(repo): Extension<SharedReservationRepo>,
    Json(body): Json<Reservation>,
) -> impl IntoResponse {
    match repo.save(Reservation::new(body.reservation_name)).await {
        Ok(reservation) => (StatusCode::CREATED, Json(reservation)).into_response(),
        Err(e) => storage_failure("adding reservation", e),
    }
}

/// Replaces the name of an existing reservation. An unknown id creates a new
/// record under a generated id.
pub async fn replace_reservation(
    Extension(repo): Extension<SharedReservationRepo>,
    Path(id): Path<i64>,
    Json(body): Json<Reservation>,
) -> impl IntoResponse {
    // Generated ids can equal the requested one, the saved id says nothing here.
    let existed = match repo.find_by_id(id).await {
        Ok(found) => found.is_some(),
        Err(e) => return storage_failure("updating reservation", e),
    };

    let reservation = Reservation {
        id: Some(id),
        reservation_name: body.reservation_name,
    };

    match repo.save(reservation).await {
        Ok(saved) if existed => (StatusCode::OK, Json(saved)).into_response(),
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => storage_failure("updating reservation", e),
    }
}

pub async fn delete_reservation(
    Extension(repo): Extension<SharedReservationRepo>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match repo.delete_by_id(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": format!("No reservation with id {}", id)})),
        ).into_response(),
        Err(e) => storage_failure("removing reservation", e),
    }
}
