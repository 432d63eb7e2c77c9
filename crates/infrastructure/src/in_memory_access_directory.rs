use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use teamgate_application::{
    AuditEvent, AuditLogEntry, AuditRepository, IdentityProvider, MembershipRepository,
    ProfileStore,
};
use teamgate_core::{ActorId, ActorIdentity, AppError, AppResult, Credential, TeamId};
use teamgate_domain::{MembershipId, Role, TeamMembership};
use tokio::sync::RwLock;
use tracing::debug;

use crate::digest_credential;

/// In-memory identity, profile, membership and audit store.
///
/// Credentials are kept only as digests, like the PostgreSQL adapters.
#[derive(Debug, Default)]
pub struct InMemoryAccessDirectory {
    actors_by_digest: RwLock<HashMap<String, ActorIdentity>>,
    global_roles: RwLock<HashMap<ActorId, Role>>,
    memberships: RwLock<HashMap<(TeamId, MembershipId), TeamMembership>>,
    audit_log: RwLock<Vec<AuditLogEntry>>,
}

impl InMemoryAccessDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an actor reachable through `credential`.
    pub async fn register_actor(&self, credential: &Credential, actor: ActorIdentity) {
        self.actors_by_digest
            .write()
            .await
            .insert(digest_credential(credential), actor);
    }

    /// Sets or clears an actor's global role.
    pub async fn set_global_role(&self, actor_id: ActorId, role: Option<Role>) {
        let mut global_roles = self.global_roles.write().await;
        match role {
            Some(role) => {
                global_roles.insert(actor_id, role);
            }
            None => {
                global_roles.remove(&actor_id);
            }
        }
    }

    /// Adds a membership. Fails when the actor already belongs to the team
    /// or when `role` is the global-only super admin role.
    pub async fn add_membership(
        &self,
        team_id: TeamId,
        actor_id: ActorId,
        role: Role,
    ) -> AppResult<TeamMembership> {
        if role == Role::SuperAdmin {
            return Err(AppError::Validation(format!(
                "role '{role}' cannot be held as a team membership"
            )));
        }

        let mut memberships = self.memberships.write().await;
        if memberships
            .values()
            .any(|membership| membership.team_id() == team_id && membership.actor_id() == actor_id)
        {
            return Err(AppError::Validation(format!(
                "actor '{actor_id}' is already a member of team '{team_id}'"
            )));
        }

        let membership =
            TeamMembership::new(MembershipId::new(), team_id, actor_id, role, Utc::now());
        memberships.insert((team_id, membership.membership_id()), membership.clone());
        Ok(membership)
    }
}

#[async_trait]
impl IdentityProvider for InMemoryAccessDirectory {
    async fn resolve_actor(&self, credential: &Credential) -> AppResult<Option<ActorIdentity>> {
        Ok(self
            .actors_by_digest
            .read()
            .await
            .get(&digest_credential(credential))
            .cloned())
    }
}

#[async_trait]
impl ProfileStore for InMemoryAccessDirectory {
    async fn find_global_role(&self, actor_id: ActorId) -> AppResult<Option<Role>> {
        Ok(self.global_roles.read().await.get(&actor_id).copied())
    }
}

#[async_trait]
impl MembershipRepository for InMemoryAccessDirectory {
    async fn find_membership(
        &self,
        team_id: TeamId,
        actor_id: ActorId,
    ) -> AppResult<Option<TeamMembership>> {
        Ok(self
            .memberships
            .read()
            .await
            .values()
            .find(|membership| membership.team_id() == team_id && membership.actor_id() == actor_id)
            .cloned())
    }

    async fn find_membership_by_id(
        &self,
        team_id: TeamId,
        membership_id: MembershipId,
    ) -> AppResult<Option<TeamMembership>> {
        Ok(self
            .memberships
            .read()
            .await
            .get(&(team_id, membership_id))
            .cloned())
    }

    async fn list_team_memberships(&self, team_id: TeamId) -> AppResult<Vec<TeamMembership>> {
        let mut values: Vec<TeamMembership> = self
            .memberships
            .read()
            .await
            .values()
            .filter(|membership| membership.team_id() == team_id)
            .cloned()
            .collect();
        values.sort_by_key(TeamMembership::joined_at);
        Ok(values)
    }

    async fn update_membership_role(
        &self,
        team_id: TeamId,
        membership_id: MembershipId,
        expected_role: Role,
        role: Role,
    ) -> AppResult<TeamMembership> {
        let mut memberships = self.memberships.write().await;
        let membership = memberships
            .get_mut(&(team_id, membership_id))
            .filter(|membership| membership.role() == expected_role)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "membership '{membership_id}' with role '{expected_role}' not found in team '{team_id}'"
                ))
            })?;

        *membership = membership.clone().with_role(role);
        debug!(%team_id, %membership_id, role = role.as_str(), "membership role updated");
        Ok(membership.clone())
    }

    async fn remove_membership(
        &self,
        team_id: TeamId,
        membership_id: MembershipId,
        expected_role: Role,
    ) -> AppResult<()> {
        let mut memberships = self.memberships.write().await;
        let key = (team_id, membership_id);
        if !memberships
            .get(&key)
            .is_some_and(|membership| membership.role() == expected_role)
        {
            return Err(AppError::NotFound(format!(
                "membership '{membership_id}' with role '{expected_role}' not found in team '{team_id}'"
            )));
        }

        memberships.remove(&key);
        Ok(())
    }
}

#[async_trait]
impl AuditRepository for InMemoryAccessDirectory {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.audit_log.write().await.push(AuditLogEntry {
            event,
            recorded_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_team_events(
        &self,
        team_id: TeamId,
        limit: usize,
        offset: usize,
    ) -> AppResult<Vec<AuditLogEntry>> {
        Ok(self
            .audit_log
            .read()
            .await
            .iter()
            .rev()
            .filter(|entry| entry.event.team_id == team_id)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
