use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use teamgate_application::IdentityProvider;
use teamgate_core::{ActorId, ActorIdentity, AppError, AppResult, Credential};
use tracing::debug;
use uuid::Uuid;

use crate::digest_credential;

/// PostgreSQL-backed bearer credential lookup.
#[derive(Clone)]
pub struct PostgresIdentityProvider {
    pool: PgPool,
}

impl PostgresIdentityProvider {
    /// Creates a provider with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ActorRow {
    id: Uuid,
    display_name: String,
    email: Option<String>,
}

#[async_trait]
impl IdentityProvider for PostgresIdentityProvider {
    async fn resolve_actor(&self, credential: &Credential) -> AppResult<Option<ActorIdentity>> {
        let row = sqlx::query_as::<_, ActorRow>(
            r#"
            SELECT profiles.id, profiles.display_name, profiles.email
            FROM actor_credentials AS credentials
            INNER JOIN profiles
                ON profiles.id = credentials.actor_id
            WHERE credentials.token_digest = $1
                AND credentials.revoked_at IS NULL
                AND (credentials.expires_at IS NULL OR credentials.expires_at > now())
            LIMIT 1
            "#,
        )
        .bind(digest_credential(credential))
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to resolve credential: {error}")))?;

        if row.is_none() {
            debug!("credential did not match an active actor");
        }

        Ok(row.map(|row| {
            ActorIdentity::new(ActorId::from_uuid(row.id), row.display_name, row.email)
        }))
    }
}
