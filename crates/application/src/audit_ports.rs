use async_trait::async_trait;
use chrono::{DateTime, Utc};
use teamgate_core::{ActorId, AppResult, TeamId};
use teamgate_domain::AuditAction;

/// Immutable audit event payload emitted by application services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Team scope for the event.
    pub team_id: TeamId,
    /// Actor that performed the action.
    pub actor_id: ActorId,
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// Resource type label.
    pub resource_type: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Optional audit detail payload.
    pub detail: Option<String>,
}

/// Persisted audit event with its recording time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogEntry {
    /// Stored event.
    pub event: AuditEvent,
    /// When the event was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Port for the append-only audit log.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;

    /// Lists a team's events, newest first.
    async fn list_team_events(
        &self,
        team_id: TeamId,
        limit: usize,
        offset: usize,
    ) -> AppResult<Vec<AuditLogEntry>>;
}
