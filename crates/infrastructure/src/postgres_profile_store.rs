use std::str::FromStr;

use async_trait::async_trait;
use sqlx::PgPool;
use teamgate_application::ProfileStore;
use teamgate_core::{ActorId, AppError, AppResult};
use teamgate_domain::Role;

/// PostgreSQL-backed global role lookup.
#[derive(Clone)]
pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn find_global_role(&self, actor_id: ActorId) -> AppResult<Option<Role>> {
        let stored_role = sqlx::query_scalar::<_, Option<String>>(
            r#"
            SELECT global_role
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(actor_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load global role: {error}")))?
        .flatten();

        stored_role
            .map(|value| {
                Role::from_str(value.as_str()).map_err(|error| {
                    AppError::Internal(format!(
                        "failed to decode global role '{value}' for actor '{actor_id}': {error}"
                    ))
                })
            })
            .transpose()
    }
}
