use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use teamgate_core::AppError;
use teamgate_infrastructure::{
    InMemoryAccessDirectory, PostgresAuditRepository, PostgresIdentityProvider,
    PostgresMembershipRepository, PostgresProfileStore,
};

use crate::api_config::DatabaseConfig;
use crate::state::AccessPorts;

pub async fn connect_database(config: &DatabaseConfig) -> Result<PgPool, AppError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(config.url.as_str())
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))
}

pub fn postgres_ports(pool: PgPool) -> AccessPorts {
    AccessPorts {
        identity_provider: Arc::new(PostgresIdentityProvider::new(pool.clone())),
        profile_store: Arc::new(PostgresProfileStore::new(pool.clone())),
        membership_repository: Arc::new(PostgresMembershipRepository::new(pool.clone())),
        audit_repository: Arc::new(PostgresAuditRepository::new(pool)),
    }
}

pub fn in_memory_ports(directory: Arc<InMemoryAccessDirectory>) -> AccessPorts {
    AccessPorts {
        identity_provider: directory.clone(),
        profile_store: directory.clone(),
        membership_repository: directory.clone(),
        audit_repository: directory,
    }
}
