use serde::Serialize;
use teamgate_application::AuthorizationContext;
use teamgate_domain::{AccessView, Role, role_permissions};
use ts_rs::TS;

/// Capability flags a client uses to show or hide controls.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/capability-flags-response.ts"
)]
pub struct CapabilityFlagsResponse {
    pub is_owner: bool,
    pub is_admin_or_owner: bool,
    pub can_manage_members: bool,
    pub can_manage_team: bool,
    pub can_manage_billing: bool,
    pub can_manage_subaccounts: bool,
}

impl From<&AccessView> for CapabilityFlagsResponse {
    fn from(view: &AccessView) -> Self {
        Self {
            is_owner: view.is_owner(),
            is_admin_or_owner: view.is_admin_or_owner(),
            can_manage_members: view.can_manage_members(),
            can_manage_team: view.can_manage_team(),
            can_manage_billing: view.can_manage_billing(),
            can_manage_subaccounts: view.can_manage_subaccounts(),
        }
    }
}

/// The caller's resolved access in the current team.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/access-snapshot-response.ts"
)]
pub struct AccessSnapshotResponse {
    pub team_id: String,
    pub actor_id: String,
    pub display_name: String,
    pub role: String,
    pub is_global_override: bool,
    pub permissions: Vec<String>,
    pub assignable_roles: Vec<String>,
    pub capabilities: CapabilityFlagsResponse,
}

impl AccessSnapshotResponse {
    pub fn new(context: &AuthorizationContext, assignable_roles: &[Role]) -> Self {
        let role = context.effective_role();
        let view = AccessView::new(Some(role));

        Self {
            team_id: context.team_id().to_string(),
            actor_id: context.actor().actor_id().to_string(),
            display_name: context.actor().display_name().to_owned(),
            role: role.as_str().to_owned(),
            is_global_override: context.is_global_override(),
            permissions: role_permissions(role)
                .iter()
                .map(|permission| permission.as_str().to_owned())
                .collect(),
            assignable_roles: assignable_roles
                .iter()
                .map(|role| role.as_str().to_owned())
                .collect(),
            capabilities: CapabilityFlagsResponse::from(&view),
        }
    }
}
