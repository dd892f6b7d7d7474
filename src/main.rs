use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use crate::config::Config;

pub mod config;
pub mod controller;
pub mod errors;
pub mod helpers;
pub mod models;
pub mod repositories;
pub mod seed_loader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();
    info!("Starting reservation service in {} environment with {:?} storage", config.environment, config.storage);

    let repo = repositories::connect(&config).await?;

    seed_loader::run(repo.as_ref(), &mut std::io::stdout())
        .await
        .context("Failed to seed sample reservations")?;

    controller::serve(repo, &config).await
}
