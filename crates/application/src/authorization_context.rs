use std::sync::Arc;

use teamgate_core::{ActorIdentity, AppError, AppResult, Credential, TeamId};
use teamgate_domain::{Role, TeamMembership};

use crate::{IdentityProvider, MembershipRepository, ProfileStore};

/// Per-request authorization context. Built fresh for every protected call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationContext {
    actor: ActorIdentity,
    team_id: TeamId,
    effective_role: Role,
    membership: Option<TeamMembership>,
}

impl AuthorizationContext {
    fn global_override(actor: ActorIdentity, team_id: TeamId) -> Self {
        Self {
            actor,
            team_id,
            effective_role: Role::SuperAdmin,
            membership: None,
        }
    }

    fn team_member(actor: ActorIdentity, team_id: TeamId, membership: TeamMembership) -> Self {
        Self {
            actor,
            team_id,
            effective_role: membership.role(),
            membership: Some(membership),
        }
    }

    /// Returns the authenticated actor.
    #[must_use]
    pub fn actor(&self) -> &ActorIdentity {
        &self.actor
    }

    /// Returns the team the context is scoped to.
    #[must_use]
    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Returns the role used for every permission check in this context.
    #[must_use]
    pub fn effective_role(&self) -> Role {
        self.effective_role
    }

    /// Returns the membership row; `None` under the global super-admin override.
    #[must_use]
    pub fn membership(&self) -> Option<&TeamMembership> {
        self.membership.as_ref()
    }

    /// Returns true when the context came from the global override.
    #[must_use]
    pub fn is_global_override(&self) -> bool {
        self.membership.is_none()
    }
}

/// Resolves an actor's effective role for one team.
#[derive(Clone)]
pub struct AuthorizationContextResolver {
    identity_provider: Arc<dyn IdentityProvider>,
    profile_store: Arc<dyn ProfileStore>,
    membership_repository: Arc<dyn MembershipRepository>,
}

impl AuthorizationContextResolver {
    /// Creates a resolver from its collaborators.
    #[must_use]
    pub fn new(
        identity_provider: Arc<dyn IdentityProvider>,
        profile_store: Arc<dyn ProfileStore>,
        membership_repository: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self {
            identity_provider,
            profile_store,
            membership_repository,
        }
    }

    /// Resolves the authorization context for `team_id`.
    ///
    /// The global role is checked before membership, so a super admin with no
    /// row in the team still resolves. Store failures surface as `Internal`.
    pub async fn resolve(
        &self,
        credential: Option<&Credential>,
        team_id: TeamId,
    ) -> AppResult<AuthorizationContext> {
        let credential = credential
            .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

        let actor = self
            .identity_provider
            .resolve_actor(credential)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid or expired credential".to_owned()))?;

        if self
            .profile_store
            .find_global_role(actor.actor_id())
            .await?
            == Some(Role::SuperAdmin)
        {
            return Ok(AuthorizationContext::global_override(actor, team_id));
        }

        let membership = self
            .membership_repository
            .find_membership(team_id, actor.actor_id())
            .await?
            .ok_or_else(|| {
                AppError::Forbidden(format!(
                    "actor '{}' is not a member of team '{team_id}'",
                    actor.actor_id()
                ))
            })?;

        Ok(AuthorizationContext::team_member(actor, team_id, membership))
    }
}

#[cfg(test)]
mod tests;
