//! Presentation-side access queries over a locally cached role.
//!
//! Nothing here is authoritative. Server-side enforcement goes through the
//! authorization gate; these helpers only decide what to show.

use serde::{Deserialize, Serialize};

use crate::{
    AccessRequirement, Permission, Role, can_manage_role, has_all_permissions, has_any_permission,
    has_permission,
};

/// Cached view of the current actor's role in the selected team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessView {
    role: Option<Role>,
}

impl AccessView {
    /// Creates a view over a cached role, or none when no team is selected.
    #[must_use]
    pub fn new(role: Option<Role>) -> Self {
        Self { role }
    }

    /// Returns the cached role.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Returns whether the cached role has the permission.
    #[must_use]
    pub fn can(&self, permission: Permission) -> bool {
        self.role
            .is_some_and(|role| has_permission(role, permission))
    }

    /// Returns whether the cached role has any of the permissions.
    #[must_use]
    pub fn can_any(&self, permissions: &[Permission]) -> bool {
        self.role
            .is_some_and(|role| has_any_permission(role, permissions))
    }

    /// Returns whether the cached role has all of the permissions.
    #[must_use]
    pub fn can_all(&self, permissions: &[Permission]) -> bool {
        self.role
            .is_some_and(|role| has_all_permissions(role, permissions))
    }

    /// Returns whether the cached role may administer `target`.
    #[must_use]
    pub fn can_manage_role(&self, target: Role) -> bool {
        self.role.is_some_and(|role| can_manage_role(role, target))
    }

    /// Returns whether the cached role is one of `roles`.
    #[must_use]
    pub fn has_role_in(&self, roles: &[Role]) -> bool {
        self.role.is_some_and(|role| roles.contains(&role))
    }

    /// Returns whether the cached role is exactly `owner`.
    #[must_use]
    pub fn is_owner(&self) -> bool {
        self.role == Some(Role::Owner)
    }

    /// Returns whether the cached role is `admin` or `owner`.
    #[must_use]
    pub fn is_admin_or_owner(&self) -> bool {
        matches!(self.role, Some(Role::Admin | Role::Owner))
    }

    /// Any of invite, role update, or removal.
    #[must_use]
    pub fn can_manage_members(&self) -> bool {
        self.can_any(&[
            Permission::MembersInvite,
            Permission::MembersUpdateRole,
            Permission::MembersRemove,
        ])
    }

    /// Returns whether team details may be edited.
    #[must_use]
    pub fn can_manage_team(&self) -> bool {
        self.can(Permission::TeamUpdate)
    }

    /// Returns whether billing controls should be shown.
    #[must_use]
    pub fn can_manage_billing(&self) -> bool {
        self.can(Permission::TeamManageBilling)
    }

    /// Any of subaccount create, update, or delete.
    #[must_use]
    pub fn can_manage_subaccounts(&self) -> bool {
        self.can_any(&[
            Permission::SubaccountsCreate,
            Permission::SubaccountsUpdate,
            Permission::SubaccountsDelete,
        ])
    }

    /// Returns `content` when the requirement holds, otherwise `fallback`.
    pub fn guard<T>(&self, requirement: &AccessRequirement, content: T, fallback: T) -> T {
        match self.role {
            Some(role) if requirement.is_satisfied_by(role) => content,
            _ => fallback,
        }
    }

    /// Returns `content` when the cached role may administer `target`.
    pub fn guard_manage_role<T>(&self, target: Role, content: T, fallback: T) -> T {
        if self.can_manage_role(target) {
            content
        } else {
            fallback
        }
    }
}
