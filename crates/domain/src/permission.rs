use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use teamgate_core::AppError;

/// Team-scoped capabilities, namespaced as `<resource>:<action>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Permission {
    /// Allows reading team details.
    #[serde(rename = "team:read")]
    TeamRead,
    /// Allows updating team details.
    #[serde(rename = "team:update")]
    TeamUpdate,
    /// Allows deleting the team.
    #[serde(rename = "team:delete")]
    TeamDelete,
    /// Allows managing the team subscription and payment details.
    #[serde(rename = "team:manage_billing")]
    TeamManageBilling,
    /// Allows listing team members.
    #[serde(rename = "members:read")]
    MembersRead,
    /// Allows inviting new members.
    #[serde(rename = "members:invite")]
    MembersInvite,
    /// Allows changing a member's role.
    #[serde(rename = "members:update_role")]
    MembersUpdateRole,
    /// Allows removing members.
    #[serde(rename = "members:remove")]
    MembersRemove,
    /// Allows reading subaccounts.
    #[serde(rename = "subaccounts:read")]
    SubaccountsRead,
    /// Allows creating subaccounts.
    #[serde(rename = "subaccounts:create")]
    SubaccountsCreate,
    /// Allows updating subaccounts.
    #[serde(rename = "subaccounts:update")]
    SubaccountsUpdate,
    /// Allows deleting subaccounts.
    #[serde(rename = "subaccounts:delete")]
    SubaccountsDelete,
    /// Allows reading team settings.
    #[serde(rename = "settings:read")]
    SettingsRead,
    /// Allows updating team settings.
    #[serde(rename = "settings:update")]
    SettingsUpdate,
    /// Allows reading analytics.
    #[serde(rename = "analytics:read")]
    AnalyticsRead,
    /// Allows reading reports.
    #[serde(rename = "reports:read")]
    ReportsRead,
    /// Allows exporting reports.
    #[serde(rename = "reports:export")]
    ReportsExport,
}

impl Permission {
    /// Returns a stable transport and storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TeamRead => "team:read",
            Self::TeamUpdate => "team:update",
            Self::TeamDelete => "team:delete",
            Self::TeamManageBilling => "team:manage_billing",
            Self::MembersRead => "members:read",
            Self::MembersInvite => "members:invite",
            Self::MembersUpdateRole => "members:update_role",
            Self::MembersRemove => "members:remove",
            Self::SubaccountsRead => "subaccounts:read",
            Self::SubaccountsCreate => "subaccounts:create",
            Self::SubaccountsUpdate => "subaccounts:update",
            Self::SubaccountsDelete => "subaccounts:delete",
            Self::SettingsRead => "settings:read",
            Self::SettingsUpdate => "settings:update",
            Self::AnalyticsRead => "analytics:read",
            Self::ReportsRead => "reports:read",
            Self::ReportsExport => "reports:export",
        }
    }

    /// Returns the resource namespace, e.g. `members` for `members:invite`.
    #[must_use]
    pub fn resource(&self) -> &'static str {
        let value = self.as_str();
        value.split_once(':').map_or(value, |(resource, _)| resource)
    }

    /// Returns all known permissions in declaration order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::TeamRead,
            Permission::TeamUpdate,
            Permission::TeamDelete,
            Permission::TeamManageBilling,
            Permission::MembersRead,
            Permission::MembersInvite,
            Permission::MembersUpdateRole,
            Permission::MembersRemove,
            Permission::SubaccountsRead,
            Permission::SubaccountsCreate,
            Permission::SubaccountsUpdate,
            Permission::SubaccountsDelete,
            Permission::SettingsRead,
            Permission::SettingsUpdate,
            Permission::AnalyticsRead,
            Permission::ReportsRead,
            Permission::ReportsExport,
        ];

        ALL
    }

    /// Parses a transport value into a permission.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}

impl Display for Permission {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}
