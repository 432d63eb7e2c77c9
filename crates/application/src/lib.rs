//! Application services and ports.

#![forbid(unsafe_code)]

mod access_ports;
mod audit_ports;
mod authorization_context;
mod authorization_gate;
mod team_member_service;

#[cfg(test)]
mod test_support;

pub use access_ports::{IdentityProvider, MembershipRepository, ProfileStore};
pub use audit_ports::{AuditEvent, AuditLogEntry, AuditRepository};
pub use authorization_context::{AuthorizationContext, AuthorizationContextResolver};
pub use authorization_gate::{AuthorizationGate, ProtectedOperation, ProtectedRequest};
pub use team_member_service::TeamMemberService;
