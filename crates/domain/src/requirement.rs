use serde::{Deserialize, Serialize};

use crate::{Permission, Role, has_all_permissions, has_any_permission, has_permission};

/// Declared access requirement of a protected operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AccessRequirement {
    /// One specific permission.
    Permission(Permission),
    /// At least one of the listed permissions.
    AnyPermission(Vec<Permission>),
    /// Every listed permission.
    AllPermissions(Vec<Permission>),
    /// The role itself must be in the allowlist; the permission table is not consulted.
    Roles(Vec<Role>),
}

impl AccessRequirement {
    /// Returns whether the role satisfies this requirement.
    #[must_use]
    pub fn is_satisfied_by(&self, role: Role) -> bool {
        match self {
            Self::Permission(permission) => has_permission(role, *permission),
            Self::AnyPermission(permissions) => has_any_permission(role, permissions),
            Self::AllPermissions(permissions) => has_all_permissions(role, permissions),
            Self::Roles(roles) => roles.contains(&role),
        }
    }

    /// Short human-readable description used in denial messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Permission(permission) => format!("permission '{permission}'"),
            Self::AnyPermission(permissions) => {
                format!("any of permissions [{}]", join(permissions))
            }
            Self::AllPermissions(permissions) => {
                format!("all of permissions [{}]", join(permissions))
            }
            Self::Roles(roles) => format!("one of roles [{}]", join(roles)),
        }
    }
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
