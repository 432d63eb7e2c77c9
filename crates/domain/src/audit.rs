use std::str::FromStr;

use serde::{Deserialize, Serialize};
use teamgate_core::AppError;

/// Stable audit actions emitted by member administration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a member's team role changes.
    MemberRoleUpdated,
    /// Emitted when a member is removed from a team.
    MemberRemoved,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MemberRoleUpdated => "team.member.role_updated",
            Self::MemberRemoved => "team.member.removed",
        }
    }
}

impl FromStr for AuditAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "team.member.role_updated" => Ok(Self::MemberRoleUpdated),
            "team.member.removed" => Ok(Self::MemberRemoved),
            _ => Err(AppError::Validation(format!(
                "unknown audit action value '{value}'"
            ))),
        }
    }
}
