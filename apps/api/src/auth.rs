use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use teamgate_application::ProtectedRequest;
use teamgate_core::{AppError, AppResult, Credential, TeamId};

/// Header carrying the caller's currently selected team.
pub const CURRENT_TEAM_HEADER: &str = "x-team-id";

/// Inbound HTTP call as seen by the authorization gate.
///
/// `params` travels with the request into the protected operation untouched.
#[derive(Debug)]
pub struct TeamRequest<P = ()> {
    team_id: Option<TeamId>,
    credential: Option<Credential>,
    pub params: P,
}

impl TeamRequest<()> {
    /// Request scoped to the team named in the `X-Team-Id` header.
    pub fn current_team(headers: &HeaderMap) -> AppResult<Self> {
        let team_id = headers
            .get(CURRENT_TEAM_HEADER)
            .map(|value| {
                value
                    .to_str()
                    .map_err(|_| AppError::Validation("invalid X-Team-Id header".to_owned()))
                    .and_then(|value| TeamId::parse(value.trim()))
            })
            .transpose()?;

        Ok(Self {
            team_id,
            credential: bearer_credential(headers),
            params: (),
        })
    }

    /// Request scoped to a team named in the route path.
    pub fn for_team(team_id: &str, headers: &HeaderMap) -> AppResult<Self> {
        Ok(Self {
            team_id: Some(TeamId::parse(team_id)?),
            credential: bearer_credential(headers),
            params: (),
        })
    }
}

impl<P> TeamRequest<P> {
    /// Attaches operation parameters.
    pub fn with_params<Q>(self, params: Q) -> TeamRequest<Q> {
        TeamRequest {
            team_id: self.team_id,
            credential: self.credential,
            params,
        }
    }
}

impl<P> ProtectedRequest for TeamRequest<P> {
    fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }

    fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }
}

fn bearer_credential(headers: &HeaderMap) -> Option<Credential> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    Credential::from_bearer(token)
}
