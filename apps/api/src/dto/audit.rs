use chrono::SecondsFormat;
use serde::Serialize;
use teamgate_application::AuditLogEntry;
use ts_rs::TS;

/// API representation of one audit log entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/audit-log-entry-response.ts"
)]
pub struct AuditLogEntryResponse {
    pub actor_id: String,
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub detail: Option<String>,
    pub created_at: String,
}

impl From<AuditLogEntry> for AuditLogEntryResponse {
    fn from(value: AuditLogEntry) -> Self {
        Self {
            actor_id: value.event.actor_id.to_string(),
            action: value.event.action.as_str().to_owned(),
            resource_type: value.event.resource_type,
            resource_id: value.event.resource_id,
            detail: value.event.detail,
            created_at: value.recorded_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}
