use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use teamgate_core::{ActorId, ActorIdentity, AppError, AppResult, Credential, TeamId};
use teamgate_domain::{MembershipId, Role, TeamMembership};
use tokio::sync::Mutex;

use crate::{
    AuditEvent, AuditLogEntry, AuditRepository, AuthorizationContextResolver,
    AuthorizationGate, IdentityProvider, MembershipRepository, ProfileStore,
};

/// Identity, profile and membership fake that counts every store call.
#[derive(Default)]
pub(crate) struct FakeAccessDirectory {
    actors: Mutex<HashMap<String, ActorIdentity>>,
    global_roles: Mutex<HashMap<ActorId, Role>>,
    memberships: Mutex<Vec<TeamMembership>>,
    role_change_after_lookup: Mutex<Option<(MembershipId, Role)>>,
    pub(crate) identity_calls: AtomicUsize,
    pub(crate) profile_calls: AtomicUsize,
    pub(crate) membership_calls: AtomicUsize,
    pub(crate) fail_profile_lookups: AtomicBool,
}

impl FakeAccessDirectory {
    pub(crate) async fn add_actor(&self, token: &str, display_name: &str) -> ActorIdentity {
        let actor = ActorIdentity::new(ActorId::new(), display_name, None);
        self.actors
            .lock()
            .await
            .insert(token.to_owned(), actor.clone());
        actor
    }

    pub(crate) async fn set_global_role(&self, actor_id: ActorId, role: Role) {
        self.global_roles.lock().await.insert(actor_id, role);
    }

    pub(crate) async fn add_membership(
        &self,
        team_id: TeamId,
        actor_id: ActorId,
        role: Role,
    ) -> TeamMembership {
        let membership =
            TeamMembership::new(MembershipId::new(), team_id, actor_id, role, Utc::now());
        self.memberships.lock().await.push(membership.clone());
        membership
    }

    /// Stores `role` for `membership_id` right after the next by-id lookup
    /// returns, so the caller holds a stale copy.
    pub(crate) async fn change_role_after_lookup(&self, membership_id: MembershipId, role: Role) {
        *self.role_change_after_lookup.lock().await = Some((membership_id, role));
    }

    pub(crate) fn store_calls(&self) -> usize {
        self.identity_calls.load(Ordering::SeqCst)
            + self.profile_calls.load(Ordering::SeqCst)
            + self.membership_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FakeAccessDirectory {
    async fn resolve_actor(&self, credential: &Credential) -> AppResult<Option<ActorIdentity>> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.actors.lock().await.get(credential.expose()).cloned())
    }
}

#[async_trait]
impl ProfileStore for FakeAccessDirectory {
    async fn find_global_role(&self, actor_id: ActorId) -> AppResult<Option<Role>> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_profile_lookups.load(Ordering::SeqCst) {
            return Err(AppError::Internal("profile store unavailable".to_owned()));
        }

        Ok(self.global_roles.lock().await.get(&actor_id).copied())
    }
}

#[async_trait]
impl MembershipRepository for FakeAccessDirectory {
    async fn find_membership(
        &self,
        team_id: TeamId,
        actor_id: ActorId,
    ) -> AppResult<Option<TeamMembership>> {
        self.membership_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .memberships
            .lock()
            .await
            .iter()
            .find(|membership| membership.team_id() == team_id && membership.actor_id() == actor_id)
            .cloned())
    }

    async fn find_membership_by_id(
        &self,
        team_id: TeamId,
        membership_id: MembershipId,
    ) -> AppResult<Option<TeamMembership>> {
        let mut memberships = self.memberships.lock().await;
        let Some(stored) = memberships.iter_mut().find(|membership| {
            membership.team_id() == team_id && membership.membership_id() == membership_id
        }) else {
            return Ok(None);
        };

        let found = stored.clone();
        let mut pending = self.role_change_after_lookup.lock().await;
        if let Some((_, role)) = pending.take_if(|(pending_id, _)| *pending_id == membership_id) {
            *stored = stored.clone().with_role(role);
        }

        Ok(Some(found))
    }

    async fn list_team_memberships(&self, team_id: TeamId) -> AppResult<Vec<TeamMembership>> {
        Ok(self
            .memberships
            .lock()
            .await
            .iter()
            .filter(|membership| membership.team_id() == team_id)
            .cloned()
            .collect())
    }

    async fn update_membership_role(
        &self,
        team_id: TeamId,
        membership_id: MembershipId,
        expected_role: Role,
        role: Role,
    ) -> AppResult<TeamMembership> {
        let mut memberships = self.memberships.lock().await;
        let membership = memberships
            .iter_mut()
            .find(|membership| {
                membership.team_id() == team_id
                    && membership.membership_id() == membership_id
                    && membership.role() == expected_role
            })
            .ok_or_else(|| AppError::NotFound(format!("membership '{membership_id}'")))?;

        *membership = membership.clone().with_role(role);
        Ok(membership.clone())
    }

    async fn remove_membership(
        &self,
        team_id: TeamId,
        membership_id: MembershipId,
        expected_role: Role,
    ) -> AppResult<()> {
        let mut memberships = self.memberships.lock().await;
        let before = memberships.len();
        memberships.retain(|membership| {
            !(membership.team_id() == team_id
                && membership.membership_id() == membership_id
                && membership.role() == expected_role)
        });

        if memberships.len() == before {
            return Err(AppError::NotFound(format!("membership '{membership_id}'")));
        }

        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    pub(crate) events: Mutex<Vec<AuditEvent>>,
    pub(crate) fail_appends: AtomicBool,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(AppError::Internal("audit sink unavailable".to_owned()));
        }

        self.events.lock().await.push(event);
        Ok(())
    }

    async fn list_team_events(
        &self,
        team_id: TeamId,
        limit: usize,
        offset: usize,
    ) -> AppResult<Vec<AuditLogEntry>> {
        Ok(self
            .events
            .lock()
            .await
            .iter()
            .rev()
            .filter(|event| event.team_id == team_id)
            .skip(offset)
            .take(limit)
            .cloned()
            .map(|event| AuditLogEntry {
                event,
                recorded_at: Utc::now(),
            })
            .collect())
    }
}

pub(crate) fn resolver_for(directory: &Arc<FakeAccessDirectory>) -> AuthorizationContextResolver {
    AuthorizationContextResolver::new(directory.clone(), directory.clone(), directory.clone())
}

pub(crate) fn gate_for(directory: &Arc<FakeAccessDirectory>) -> AuthorizationGate {
    AuthorizationGate::new(resolver_for(directory))
}

pub(crate) fn credential(token: &str) -> Credential {
    match Credential::from_bearer(token) {
        Some(credential) => credential,
        None => panic!("test token must not be blank"),
    }
}
