use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use teamgate_core::{ActorId, AppError, AppResult, TeamId};
use uuid::Uuid;

use crate::Role;

/// Unique identifier for a team membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MembershipId(Uuid);

impl MembershipId {
    /// Creates a new random membership identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a membership identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses a transport value into a membership identifier.
    pub fn parse(value: &str) -> AppResult<Self> {
        Uuid::parse_str(value.trim()).map(Self).map_err(|error| {
            AppError::Validation(format!("invalid membership id '{value}': {error}"))
        })
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MembershipId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MembershipId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Binds one actor to one team with exactly one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembership {
    membership_id: MembershipId,
    team_id: TeamId,
    actor_id: ActorId,
    role: Role,
    joined_at: DateTime<Utc>,
}

impl TeamMembership {
    /// Creates a membership record.
    #[must_use]
    pub fn new(
        membership_id: MembershipId,
        team_id: TeamId,
        actor_id: ActorId,
        role: Role,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            membership_id,
            team_id,
            actor_id,
            role,
            joined_at,
        }
    }

    /// Returns the membership identifier.
    #[must_use]
    pub fn membership_id(&self) -> MembershipId {
        self.membership_id
    }

    /// Returns the team the membership belongs to.
    #[must_use]
    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Returns the member actor.
    #[must_use]
    pub fn actor_id(&self) -> ActorId {
        self.actor_id
    }

    /// Returns the stored team role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns when the actor joined the team.
    #[must_use]
    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// Returns a copy with a different role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}
