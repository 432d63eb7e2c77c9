use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use teamgate_application::MembershipRepository;
use teamgate_core::{ActorId, AppError, AppResult, TeamId};
use teamgate_domain::{MembershipId, Role, TeamMembership};
use uuid::Uuid;

/// PostgreSQL-backed team membership repository.
#[derive(Clone)]
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MembershipRow {
    id: Uuid,
    team_id: Uuid,
    actor_id: Uuid,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<MembershipRow> for TeamMembership {
    type Error = AppError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(row.role.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "failed to decode role '{}' for membership '{}': {error}",
                row.role, row.id
            ))
        })?;

        Ok(TeamMembership::new(
            MembershipId::from_uuid(row.id),
            TeamId::from_uuid(row.team_id),
            ActorId::from_uuid(row.actor_id),
            role,
            row.created_at,
        ))
    }
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn find_membership(
        &self,
        team_id: TeamId,
        actor_id: ActorId,
    ) -> AppResult<Option<TeamMembership>> {
        sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT id, team_id, actor_id, role, created_at
            FROM team_members
            WHERE team_id = $1
                AND actor_id = $2
            "#,
        )
        .bind(team_id.as_uuid())
        .bind(actor_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load team membership: {error}")))?
        .map(TeamMembership::try_from)
        .transpose()
    }

    async fn find_membership_by_id(
        &self,
        team_id: TeamId,
        membership_id: MembershipId,
    ) -> AppResult<Option<TeamMembership>> {
        sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT id, team_id, actor_id, role, created_at
            FROM team_members
            WHERE team_id = $1
                AND id = $2
            "#,
        )
        .bind(team_id.as_uuid())
        .bind(membership_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load team membership: {error}")))?
        .map(TeamMembership::try_from)
        .transpose()
    }

    async fn list_team_memberships(&self, team_id: TeamId) -> AppResult<Vec<TeamMembership>> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT id, team_id, actor_id, role, created_at
            FROM team_members
            WHERE team_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(team_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list team members: {error}")))?;

        rows.into_iter().map(TeamMembership::try_from).collect()
    }

    async fn update_membership_role(
        &self,
        team_id: TeamId,
        membership_id: MembershipId,
        expected_role: Role,
        role: Role,
    ) -> AppResult<TeamMembership> {
        sqlx::query_as::<_, MembershipRow>(
            r#"
            UPDATE team_members
            SET role = $4
            WHERE team_id = $1
                AND id = $2
                AND role = $3
            RETURNING id, team_id, actor_id, role, created_at
            "#,
        )
        .bind(team_id.as_uuid())
        .bind(membership_id.as_uuid())
        .bind(expected_role.as_str())
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update member role: {error}")))?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "membership '{membership_id}' with role '{expected_role}' not found in team '{team_id}'"
            ))
        })
        .and_then(TeamMembership::try_from)
    }

    async fn remove_membership(
        &self,
        team_id: TeamId,
        membership_id: MembershipId,
        expected_role: Role,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM team_members
            WHERE team_id = $1
                AND id = $2
                AND role = $3
            "#,
        )
        .bind(team_id.as_uuid())
        .bind(membership_id.as_uuid())
        .bind(expected_role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to remove team member: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "membership '{membership_id}' with role '{expected_role}' not found in team '{team_id}'"
            )));
        }

        Ok(())
    }
}
