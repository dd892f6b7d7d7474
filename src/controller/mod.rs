use std::net::{SocketAddr, TcpListener};
use anyhow::Context;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;
use crate::repositories::SharedReservationRepo;

pub mod health_check;
pub mod reservation_controller;

pub async fn serve(
    repo: SharedReservationRepo,
    config: &Config,
) -> anyhow::Result<()> {
    let port = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(port)
        .with_context(|| format!("Failed to bind API server to {}", port))?;

    serve_on(listener, application(repo, config)).await
}

pub async fn serve_on(
    listener: TcpListener,
    application: Router,
) -> anyhow::Result<()> {
    info!("API server listening on: {}", listener.local_addr()?);
    axum::Server::from_tcp(listener)
        .context("Error spinning up the API server")?
        .serve(application.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Error running the API server")
}

pub fn application(
    repo: SharedReservationRepo,
    config: &Config,
) -> Router {
    let origins: Vec<HeaderValue> = config
        .origin_urls
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", s);
                None
            }
        })
        .collect();

    router_endpoints(repo)
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PUT,
                            Method::DELETE,
                            Method::OPTIONS
                        ])
                        .allow_origin(origins)
                        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                )
        )
        .fallback(page_not_found_handler)
}

pub fn router_endpoints(repo: SharedReservationRepo) -> Router {
    health_check::router()
        .nest("/reservations", reservation_controller::router(repo))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping API server");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use clap::Parser;
    use reqwest::StatusCode;
    use serde_json::{json, Value};
    use crate::repositories::memory_repo::InMemoryReservationRepo;
    use crate::seed_loader;
    use super::*;

    #[tokio::test]
    async fn seeded_service_serves_reservations_end_to_end() {
        let config = Config::try_parse_from(["reservation-service"]).unwrap();
        let repo: SharedReservationRepo = Arc::new(InMemoryReservationRepo::new());
        let mut out = Vec::new();
        seed_loader::run(repo.as_ref(), &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 8);

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(serve_on(listener, application(repo, &config)));

        let client = reqwest::Client::new();

        let res = client.get(format!("{}/health", base_url)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let listed: Vec<Value> = client
            .get(format!("{}/reservations", base_url))
            .send().await.unwrap()
            .json().await.unwrap();
        assert_eq!(listed.len(), 8);
        assert_eq!(listed[0]["reservationName"], "Josh");

        let created: Value = client
            .post(format!("{}/reservations", base_url))
            .json(&json!({"reservationName": "Dave"}))
            .send().await.unwrap()
            .json().await.unwrap();
        assert_eq!(created, json!({"id": 9, "reservationName": "Dave"}));

        let res = client.get(format!("{}/nowhere", base_url)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
