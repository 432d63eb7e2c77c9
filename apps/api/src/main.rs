//! Teamgate API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod auth;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod state;

use std::sync::Arc;

use teamgate_core::AppError;
use teamgate_infrastructure::InMemoryAccessDirectory;
use tracing::{info, warn};

use crate::api_config::{ApiConfig, DatabaseConfig, StorageBackend};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    api_config::init_tracing();

    let config = ApiConfig::load()?;

    if config.migrate_only {
        let pool = api_services::connect_database(required_database(&config)?).await?;
        api_services::run_migrations(&pool).await?;
        info!("database migrations applied successfully");
        return Ok(());
    }

    let ports = match config.storage_backend {
        StorageBackend::Postgres => {
            if config.dev_seed_owner_token.is_some() {
                warn!("DEV_SEED_OWNER_TOKEN is ignored by the postgres backend");
            }
            let pool = api_services::connect_database(required_database(&config)?).await?;
            api_services::run_migrations(&pool).await?;
            api_services::postgres_ports(pool)
        }
        StorageBackend::Memory => {
            let directory = Arc::new(InMemoryAccessDirectory::new());
            match config.dev_seed_owner_token.as_deref() {
                Some(token) => {
                    dev_seed::seed_dev_team(&directory, token).await?;
                }
                None => warn!("memory backend started without DEV_SEED_OWNER_TOKEN; no teams exist"),
            }
            api_services::in_memory_ports(directory)
        }
    };

    let app = api_router::build_router(AppState::new(ports), &config.frontend_url)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, backend = ?config.storage_backend, "teamgate-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

fn required_database(config: &ApiConfig) -> Result<&DatabaseConfig, AppError> {
    config
        .database
        .as_ref()
        .ok_or_else(|| AppError::Validation("DATABASE_URL is required".to_owned()))
}
