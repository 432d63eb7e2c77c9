use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use teamgate_domain::{Role, TeamMembership};
use ts_rs::TS;

/// API representation of a team membership.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/member-response.ts"
)]
pub struct MemberResponse {
    pub membership_id: String,
    pub team_id: String,
    pub actor_id: String,
    pub role: String,
    pub joined_at: String,
}

impl From<TeamMembership> for MemberResponse {
    fn from(value: TeamMembership) -> Self {
        Self {
            membership_id: value.membership_id().to_string(),
            team_id: value.team_id().to_string(),
            actor_id: value.actor_id().to_string(),
            role: value.role().as_str().to_owned(),
            joined_at: value.joined_at().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Roles the caller may hand out.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/assignable-roles-response.ts"
)]
pub struct AssignableRolesResponse {
    pub roles: Vec<String>,
}

impl From<Vec<Role>> for AssignableRolesResponse {
    fn from(value: Vec<Role>) -> Self {
        Self {
            roles: value
                .into_iter()
                .map(|role| role.as_str().to_owned())
                .collect(),
        }
    }
}

/// Incoming payload for a member role change.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-member-role-request.ts"
)]
pub struct UpdateMemberRoleRequest {
    pub role: String,
}
