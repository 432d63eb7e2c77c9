use teamgate_core::{ActorId, ActorIdentity, AppError, AppResult, Credential, TeamId};
use teamgate_domain::Role;
use teamgate_infrastructure::InMemoryAccessDirectory;
use tracing::info;
use uuid::Uuid;

const DEV_SEED_TEAM_ID: Uuid = Uuid::from_u128(0x1111_1111_1111_1111_1111_1111_1111_1111);

/// Seeds one team owned by the actor behind `owner_token`.
///
/// Companion actors reachable as `<owner_token>-admin`, `-member` and
/// `-viewer` fill out the roster.
pub async fn seed_dev_team(
    directory: &InMemoryAccessDirectory,
    owner_token: &str,
) -> AppResult<TeamId> {
    let team_id = TeamId::from_uuid(DEV_SEED_TEAM_ID);

    let seeds = [
        (owner_token.to_owned(), "Team Owner", Role::Owner),
        (format!("{owner_token}-admin"), "Team Admin", Role::Admin),
        (format!("{owner_token}-member"), "Team Member", Role::Member),
        (format!("{owner_token}-viewer"), "Team Viewer", Role::Viewer),
    ];

    for (token, display_name, role) in seeds {
        let credential = Credential::from_bearer(token.as_str()).ok_or_else(|| {
            AppError::Validation("DEV_SEED_OWNER_TOKEN must not be empty".to_owned())
        })?;
        let actor = ActorIdentity::new(ActorId::new(), display_name, None);
        directory.register_actor(&credential, actor.clone()).await;
        directory
            .add_membership(team_id, actor.actor_id(), role)
            .await?;
    }

    info!(%team_id, "seeded development team");
    Ok(team_id)
}
