use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use teamgate_core::AppError;
use tracing_subscriber::EnvFilter;

/// Storage backing the access ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" => Ok(Self::Postgres),
            other => Err(AppError::Validation(format!(
                "STORAGE_BACKEND must be either 'memory' or 'postgres', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub storage_backend: StorageBackend,
    pub database: Option<DatabaseConfig>,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub dev_seed_owner_token: Option<String>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(env::args().nth(1).as_deref(), |name| env::var(name).ok())
    }

    fn from_lookup(
        first_argument: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let migrate_only = first_argument == Some("migrate");

        let storage_backend = lookup("STORAGE_BACKEND")
            .filter(|value| !value.trim().is_empty())
            .map(|value| StorageBackend::from_str(value.as_str()))
            .transpose()?
            .unwrap_or(StorageBackend::Memory);

        let database = match lookup("DATABASE_URL").filter(|value| !value.trim().is_empty()) {
            Some(url) => {
                let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
                    Some(value) => value.trim().parse::<u32>().map_err(|error| {
                        AppError::Validation(format!("invalid DATABASE_MAX_CONNECTIONS: {error}"))
                    })?,
                    None => 10,
                };
                Some(DatabaseConfig {
                    url,
                    max_connections,
                })
            }
            None => None,
        };

        if database.is_none() && (migrate_only || storage_backend == StorageBackend::Postgres) {
            return Err(AppError::Validation(
                "DATABASE_URL is required for the postgres backend and migrations".to_owned(),
            ));
        }

        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = match lookup("API_PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))?,
            None => 3001,
        };

        let dev_seed_owner_token =
            lookup("DEV_SEED_OWNER_TOKEN").filter(|value| !value.trim().is_empty());

        Ok(Self {
            migrate_only,
            storage_backend,
            database,
            frontend_url,
            api_host,
            api_port,
            dev_seed_owner_token,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
