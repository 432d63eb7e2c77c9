//! Team roles and the role hierarchy.
//!
//! `level` gives a total order used for relative comparisons only. Who may
//! administer whom is a separate, explicit relation in [`can_manage_role`]
//! and is deliberately stricter than "higher level manages lower".

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use teamgate_core::AppError;

/// Role held by an actor, either per team or as a global override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Global operator role that bypasses team membership.
    SuperAdmin,
    /// Team owner.
    Owner,
    /// Team administrator.
    Admin,
    /// Regular team member.
    Member,
    /// Read-only team member.
    Viewer,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Viewer => "viewer",
        }
    }

    /// Returns all roles from most to least privileged.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[
            Role::SuperAdmin,
            Role::Owner,
            Role::Admin,
            Role::Member,
            Role::Viewer,
        ];

        ALL
    }

    /// Roles that can be granted through member administration.
    #[must_use]
    pub fn assignable() -> &'static [Self] {
        const ASSIGNABLE: &[Role] = &[Role::Admin, Role::Member, Role::Viewer];

        ASSIGNABLE
    }

    /// Returns the privilege level, `viewer` = 1 through `super_admin` = 5.
    #[must_use]
    pub fn level(&self) -> u8 {
        match self {
            Self::Viewer => 1,
            Self::Member => 2,
            Self::Admin => 3,
            Self::Owner => 4,
            Self::SuperAdmin => 5,
        }
    }

    /// Returns true when this role sits strictly above `other`.
    #[must_use]
    pub fn is_higher_than(&self, other: Role) -> bool {
        self.level() > other.level()
    }

    /// Returns true when an actor holding this role may administer `target`.
    #[must_use]
    pub fn can_manage(&self, target: Role) -> bool {
        can_manage_role(*self, target)
    }

    /// Parses a transport value into a role.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

/// Explicit "who can administer whom" relation.
///
/// Must not be rewritten as a level comparison: an admin cannot manage a peer
/// admin, and an owner cannot manage another owner.
#[must_use]
pub fn can_manage_role(acting: Role, target: Role) -> bool {
    match acting {
        Role::SuperAdmin => true,
        Role::Owner => !matches!(target, Role::Owner | Role::SuperAdmin),
        Role::Admin => matches!(target, Role::Member | Role::Viewer),
        Role::Member | Role::Viewer => false,
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "super_admin" => Ok(Self::SuperAdmin),
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            "viewer" => Ok(Self::Viewer),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}
