use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use teamgate_application::{AuditEvent, AuditLogEntry, AuditRepository};
use teamgate_core::{ActorId, AppError, AppResult, TeamId};
use teamgate_domain::AuditAction;
use uuid::Uuid;

/// PostgreSQL-backed append-only audit repository.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditRow {
    team_id: Uuid,
    actor_id: Uuid,
    action: String,
    resource_type: String,
    resource_id: String,
    detail: Option<String>,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_log_entries (
                team_id,
                actor_id,
                action,
                resource_type,
                resource_id,
                detail
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(event.team_id.as_uuid())
        .bind(event.actor_id.as_uuid())
        .bind(event.action.as_str())
        .bind(event.resource_type)
        .bind(event.resource_id)
        .bind(event.detail)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append audit event: {error}")))?;

        Ok(())
    }

    async fn list_team_events(
        &self,
        team_id: TeamId,
        limit: usize,
        offset: usize,
    ) -> AppResult<Vec<AuditLogEntry>> {
        let limit = i64::try_from(limit)
            .map_err(|_| AppError::Validation(format!("audit limit {limit} is too large")))?;
        let offset = i64::try_from(offset)
            .map_err(|_| AppError::Validation(format!("audit offset {offset} is too large")))?;

        let rows = sqlx::query_as::<_, AuditRow>(
            r#"
            SELECT team_id, actor_id, action, resource_type, resource_id, detail, created_at
            FROM audit_log_entries
            WHERE team_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(team_id.as_uuid())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list audit events: {error}")))?;

        rows.into_iter()
            .map(|row| {
                let action = AuditAction::from_str(row.action.as_str()).map_err(|error| {
                    AppError::Internal(format!(
                        "failed to decode audit action '{}': {error}",
                        row.action
                    ))
                })?;

                Ok(AuditLogEntry {
                    event: AuditEvent {
                        team_id: TeamId::from_uuid(row.team_id),
                        actor_id: ActorId::from_uuid(row.actor_id),
                        action,
                        resource_type: row.resource_type,
                        resource_id: row.resource_id,
                        detail: row.detail,
                    },
                    recorded_at: row.created_at,
                })
            })
            .collect()
    }
}
