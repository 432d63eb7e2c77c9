use std::sync::Arc;

use teamgate_core::{AppError, AppResult};
use teamgate_domain::{AuditAction, MembershipId, Role, TeamMembership, can_manage_role};
use tracing::warn;

use crate::{AuditEvent, AuditLogEntry, AuditRepository, AuthorizationContext, MembershipRepository};

const MEMBERSHIP_RESOURCE_TYPE: &str = "team_membership";

/// Member administration for callers already authorized by the gate.
#[derive(Clone)]
pub struct TeamMemberService {
    membership_repository: Arc<dyn MembershipRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl TeamMemberService {
    /// Creates a new member service.
    #[must_use]
    pub fn new(
        membership_repository: Arc<dyn MembershipRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            membership_repository,
            audit_repository,
        }
    }

    /// Lists the memberships of the context's team.
    pub async fn list_members(
        &self,
        context: &AuthorizationContext,
    ) -> AppResult<Vec<TeamMembership>> {
        self.membership_repository
            .list_team_memberships(context.team_id())
            .await
    }

    /// Roles the context's actor may hand out to other members.
    #[must_use]
    pub fn assignable_roles(&self, context: &AuthorizationContext) -> Vec<Role> {
        Role::assignable()
            .iter()
            .copied()
            .filter(|role| can_manage_role(context.effective_role(), *role))
            .collect()
    }

    /// Changes another member's role.
    pub async fn change_member_role(
        &self,
        context: &AuthorizationContext,
        membership_id: MembershipId,
        new_role: Role,
    ) -> AppResult<TeamMembership> {
        if !Role::assignable().contains(&new_role) {
            return Err(AppError::Validation(format!(
                "role '{new_role}' cannot be assigned to a team member"
            )));
        }

        let target = self.find_target(context, membership_id).await?;
        if target.role() == Role::Owner {
            return Err(AppError::Validation(
                "the team owner's role cannot be changed".to_owned(),
            ));
        }

        let acting_role = context.effective_role();
        if !can_manage_role(acting_role, target.role()) || !can_manage_role(acting_role, new_role)
        {
            return Err(AppError::InsufficientPermissions(format!(
                "role '{acting_role}' cannot change a '{}' member to '{new_role}'",
                target.role()
            )));
        }

        let updated = self
            .membership_repository
            .update_membership_role(context.team_id(), membership_id, target.role(), new_role)
            .await?;

        self.record(
            context,
            AuditAction::MemberRoleUpdated,
            membership_id,
            format!("role changed from '{}' to '{new_role}'", target.role()),
        )
        .await;

        Ok(updated)
    }

    /// Removes a member from the context's team.
    pub async fn remove_member(
        &self,
        context: &AuthorizationContext,
        membership_id: MembershipId,
    ) -> AppResult<()> {
        let target = self.find_target(context, membership_id).await?;
        if target.role() == Role::Owner {
            return Err(AppError::Validation(
                "the team owner cannot be removed".to_owned(),
            ));
        }

        let acting_role = context.effective_role();
        if !can_manage_role(acting_role, target.role()) {
            return Err(AppError::InsufficientPermissions(format!(
                "role '{acting_role}' cannot remove a '{}' member",
                target.role()
            )));
        }

        self.membership_repository
            .remove_membership(context.team_id(), membership_id, target.role())
            .await?;

        self.record(
            context,
            AuditAction::MemberRemoved,
            membership_id,
            format!("removed member with role '{}'", target.role()),
        )
        .await;

        Ok(())
    }

    /// Lists the team's audit log, newest first.
    pub async fn list_audit_log(
        &self,
        context: &AuthorizationContext,
        limit: usize,
        offset: usize,
    ) -> AppResult<Vec<AuditLogEntry>> {
        self.audit_repository
            .list_team_events(context.team_id(), limit, offset)
            .await
    }

    async fn find_target(
        &self,
        context: &AuthorizationContext,
        membership_id: MembershipId,
    ) -> AppResult<TeamMembership> {
        self.membership_repository
            .find_membership_by_id(context.team_id(), membership_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "membership '{membership_id}' not found in team '{}'",
                    context.team_id()
                ))
            })
    }

    // Audit is fire-and-forget: a failed append never fails the mutation.
    async fn record(
        &self,
        context: &AuthorizationContext,
        action: AuditAction,
        membership_id: MembershipId,
        detail: String,
    ) {
        let event = AuditEvent {
            team_id: context.team_id(),
            actor_id: context.actor().actor_id(),
            action,
            resource_type: MEMBERSHIP_RESOURCE_TYPE.to_owned(),
            resource_id: membership_id.to_string(),
            detail: Some(detail),
        };

        if let Err(error) = self.audit_repository.append_event(event).await {
            warn!(
                team_id = %context.team_id(),
                action = action.as_str(),
                %error,
                "failed to append audit event"
            );
        }
    }
}

#[cfg(test)]
mod tests;
