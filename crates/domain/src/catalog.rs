//! Fixed role to permission table and the predicates over it.

use crate::{Permission, Role};

use Permission::{
    AnalyticsRead, MembersInvite, MembersRead, MembersRemove, MembersUpdateRole, ReportsExport,
    ReportsRead, SettingsRead, SettingsUpdate, SubaccountsCreate, SubaccountsDelete,
    SubaccountsRead, SubaccountsUpdate, TeamDelete, TeamManageBilling, TeamRead, TeamUpdate,
};

const OWNER_PERMISSIONS: &[Permission] = &[
    TeamRead,
    TeamUpdate,
    TeamDelete,
    TeamManageBilling,
    MembersRead,
    MembersInvite,
    MembersUpdateRole,
    MembersRemove,
    SubaccountsRead,
    SubaccountsCreate,
    SubaccountsUpdate,
    SubaccountsDelete,
    SettingsRead,
    SettingsUpdate,
    AnalyticsRead,
    ReportsRead,
    ReportsExport,
];

const ADMIN_PERMISSIONS: &[Permission] = &[
    TeamRead,
    TeamUpdate,
    MembersRead,
    MembersInvite,
    MembersUpdateRole,
    MembersRemove,
    SubaccountsRead,
    SubaccountsCreate,
    SubaccountsUpdate,
    SubaccountsDelete,
    SettingsRead,
    SettingsUpdate,
    AnalyticsRead,
    ReportsRead,
    ReportsExport,
];

const MEMBER_PERMISSIONS: &[Permission] = &[
    TeamRead,
    MembersRead,
    SubaccountsRead,
    SubaccountsCreate,
    SubaccountsUpdate,
    SettingsRead,
    AnalyticsRead,
    ReportsRead,
];

const VIEWER_PERMISSIONS: &[Permission] = &[
    TeamRead,
    MembersRead,
    SubaccountsRead,
    SettingsRead,
    AnalyticsRead,
    ReportsRead,
];

/// Returns the fixed permission set of a role.
///
/// `super_admin` shares the owner table; its extra power is the membership
/// bypass applied during context resolution, not additional permissions.
#[must_use]
pub fn role_permissions(role: Role) -> &'static [Permission] {
    match role {
        Role::SuperAdmin | Role::Owner => OWNER_PERMISSIONS,
        Role::Admin => ADMIN_PERMISSIONS,
        Role::Member => MEMBER_PERMISSIONS,
        Role::Viewer => VIEWER_PERMISSIONS,
    }
}

/// Returns whether the role's fixed set contains the permission.
#[must_use]
pub fn has_permission(role: Role, permission: Permission) -> bool {
    role_permissions(role).contains(&permission)
}

/// Returns whether at least one permission holds. False for an empty list.
#[must_use]
pub fn has_any_permission(role: Role, permissions: &[Permission]) -> bool {
    permissions
        .iter()
        .any(|permission| has_permission(role, *permission))
}

/// Returns whether every permission holds. True for an empty list.
#[must_use]
pub fn has_all_permissions(role: Role, permissions: &[Permission]) -> bool {
    permissions
        .iter()
        .all(|permission| has_permission(role, *permission))
}
