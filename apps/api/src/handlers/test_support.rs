use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use teamgate_application::IdentityProvider;
use teamgate_core::{ActorId, ActorIdentity, AppResult, Credential, TeamId};
use teamgate_domain::{Role, TeamMembership};
use teamgate_infrastructure::InMemoryAccessDirectory;

use crate::api_services::in_memory_ports;
use crate::auth::CURRENT_TEAM_HEADER;
use crate::error::ApiResult;
use crate::state::AppState;

/// Identity provider spy that counts lookups before delegating.
struct CountingIdentityProvider {
    inner: Arc<InMemoryAccessDirectory>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl IdentityProvider for CountingIdentityProvider {
    async fn resolve_actor(&self, credential: &Credential) -> AppResult<Option<ActorIdentity>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve_actor(credential).await
    }
}

pub struct Harness {
    pub state: AppState,
    pub directory: Arc<InMemoryAccessDirectory>,
    pub team_id: TeamId,
    identity_calls: Arc<AtomicUsize>,
}

impl Harness {
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryAccessDirectory::new());
        let identity_calls = Arc::new(AtomicUsize::new(0));
        let mut ports = in_memory_ports(directory.clone());
        ports.identity_provider = Arc::new(CountingIdentityProvider {
            inner: directory.clone(),
            calls: identity_calls.clone(),
        });

        Self {
            state: AppState::new(ports),
            directory,
            team_id: TeamId::new(),
            identity_calls,
        }
    }

    pub fn identity_calls(&self) -> usize {
        self.identity_calls.load(Ordering::SeqCst)
    }

    async fn actor(&self, token: &str) -> ActorIdentity {
        let actor = ActorIdentity::new(ActorId::new(), token, None);
        self.directory
            .register_actor(&credential(token), actor.clone())
            .await;
        actor
    }

    pub async fn member(&self, token: &str, role: Role) -> TeamMembership {
        let actor = self.actor(token).await;
        match self
            .directory
            .add_membership(self.team_id, actor.actor_id(), role)
            .await
        {
            Ok(membership) => membership,
            Err(error) => panic!("failed to seed membership: {error}"),
        }
    }

    pub async fn super_admin(&self, token: &str) {
        let actor = self.actor(token).await;
        self.directory
            .set_global_role(actor.actor_id(), Some(Role::SuperAdmin))
            .await;
    }

    /// Headers for the `/current` routes.
    pub fn current_headers(&self, token: &str) -> HeaderMap {
        current_team_headers(Some(token), self.team_id)
    }

    pub fn team_path(&self) -> String {
        self.team_id.to_string()
    }
}

pub fn credential(token: &str) -> Credential {
    match Credential::from_bearer(token) {
        Some(credential) => credential,
        None => panic!("blank test token"),
    }
}

pub fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("authorization", header_value(&format!("Bearer {token}")));
    headers
}

pub fn current_team_headers(token: Option<&str>, team_id: TeamId) -> HeaderMap {
    let mut headers = token.map(bearer_headers).unwrap_or_default();
    headers.insert(CURRENT_TEAM_HEADER, header_value(&team_id.to_string()));
    headers
}

fn header_value(value: &str) -> HeaderValue {
    match HeaderValue::from_str(value) {
        Ok(value) => value,
        Err(error) => panic!("invalid test header value: {error}"),
    }
}

pub fn status_of<T>(result: &ApiResult<T>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(error) => error.status(),
    }
}
