//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access_view;
mod audit;
mod catalog;
mod membership;
mod permission;
mod requirement;
mod role;

pub use access_view::AccessView;
pub use audit::AuditAction;
pub use catalog::{has_all_permissions, has_any_permission, has_permission, role_permissions};
pub use membership::{MembershipId, TeamMembership};
pub use permission::Permission;
pub use requirement::AccessRequirement;
pub use role::{Role, can_manage_role};
