mod access;
mod audit;
mod common;
mod members;

pub use access::AccessSnapshotResponse;
pub use audit::AuditLogEntryResponse;
pub use common::{ErrorResponse, HealthResponse};
pub use members::{AssignableRolesResponse, MemberResponse, UpdateMemberRoleRequest};
