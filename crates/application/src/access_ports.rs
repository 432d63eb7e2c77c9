use async_trait::async_trait;
use teamgate_core::{ActorId, ActorIdentity, AppResult, Credential, TeamId};
use teamgate_domain::{MembershipId, Role, TeamMembership};

/// Port resolving an inbound credential to an actor.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the actor behind the credential, or `None` when it is unknown or revoked.
    async fn resolve_actor(&self, credential: &Credential) -> AppResult<Option<ActorIdentity>>;
}

/// Port for global, team-independent actor attributes.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Returns the actor's global role, if any.
    async fn find_global_role(&self, actor_id: ActorId) -> AppResult<Option<Role>>;
}

/// Repository port for team memberships.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Finds the actor's membership in one team.
    async fn find_membership(
        &self,
        team_id: TeamId,
        actor_id: ActorId,
    ) -> AppResult<Option<TeamMembership>>;

    /// Finds a membership row by its identifier within a team.
    async fn find_membership_by_id(
        &self,
        team_id: TeamId,
        membership_id: MembershipId,
    ) -> AppResult<Option<TeamMembership>>;

    /// Lists all memberships of a team ordered by join time.
    async fn list_team_memberships(&self, team_id: TeamId) -> AppResult<Vec<TeamMembership>>;

    /// Replaces the stored role of a membership that still holds `expected_role`.
    ///
    /// Fails with `NotFound` when the row is gone or its role changed since it was read.
    async fn update_membership_role(
        &self,
        team_id: TeamId,
        membership_id: MembershipId,
        expected_role: Role,
        role: Role,
    ) -> AppResult<TeamMembership>;

    /// Deletes a membership row that still holds `expected_role`.
    async fn remove_membership(
        &self,
        team_id: TeamId,
        membership_id: MembershipId,
        expected_role: Role,
    ) -> AppResult<()>;
}
