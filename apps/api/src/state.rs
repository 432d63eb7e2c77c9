use std::sync::Arc;

use teamgate_application::{
    AuditRepository, AuthorizationContextResolver, AuthorizationGate, IdentityProvider,
    MembershipRepository, ProfileStore, TeamMemberService,
};

/// Port implementations selected by the storage backend.
#[derive(Clone)]
pub struct AccessPorts {
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub profile_store: Arc<dyn ProfileStore>,
    pub membership_repository: Arc<dyn MembershipRepository>,
    pub audit_repository: Arc<dyn AuditRepository>,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub gate: AuthorizationGate,
    pub team_member_service: TeamMemberService,
}

impl AppState {
    pub fn new(ports: AccessPorts) -> Self {
        let resolver = AuthorizationContextResolver::new(
            ports.identity_provider,
            ports.profile_store,
            ports.membership_repository.clone(),
        );

        Self {
            gate: AuthorizationGate::new(resolver),
            team_member_service: TeamMemberService::new(
                ports.membership_repository,
                ports.audit_repository,
            ),
        }
    }
}
