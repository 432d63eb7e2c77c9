use std::sync::Arc;
use std::sync::atomic::Ordering;

use teamgate_core::{AppError, TeamId};
use teamgate_domain::Role;

use crate::test_support::{FakeAccessDirectory, credential, resolver_for};

#[tokio::test]
async fn super_admin_without_membership_resolves_with_global_role() {
    let directory = Arc::new(FakeAccessDirectory::default());
    let actor = directory.add_actor("tok-root", "Root").await;
    directory
        .set_global_role(actor.actor_id(), Role::SuperAdmin)
        .await;
    let team_id = TeamId::new();

    let result = resolver_for(&directory)
        .resolve(Some(&credential("tok-root")), team_id)
        .await;

    let context = match result {
        Ok(context) => context,
        Err(error) => panic!("expected context, got {error}"),
    };
    assert_eq!(context.effective_role(), Role::SuperAdmin);
    assert_eq!(context.team_id(), team_id);
    assert!(context.membership().is_none());
    assert!(context.is_global_override());
    assert_eq!(directory.membership_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn super_admin_override_wins_over_team_membership() {
    let directory = Arc::new(FakeAccessDirectory::default());
    let actor = directory.add_actor("tok-root", "Root").await;
    let team_id = TeamId::new();
    directory
        .set_global_role(actor.actor_id(), Role::SuperAdmin)
        .await;
    directory
        .add_membership(team_id, actor.actor_id(), Role::Viewer)
        .await;

    let result = resolver_for(&directory)
        .resolve(Some(&credential("tok-root")), team_id)
        .await;

    assert!(matches!(result, Ok(context) if context.effective_role() == Role::SuperAdmin));
}

#[tokio::test]
async fn actor_without_global_role_or_membership_is_forbidden() {
    let directory = Arc::new(FakeAccessDirectory::default());
    directory.add_actor("tok-alice", "Alice").await;

    let result = resolver_for(&directory)
        .resolve(Some(&credential("tok-alice")), TeamId::new())
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn non_super_admin_global_role_does_not_bypass_membership() {
    let directory = Arc::new(FakeAccessDirectory::default());
    let actor = directory.add_actor("tok-alice", "Alice").await;
    directory.set_global_role(actor.actor_id(), Role::Owner).await;

    let result = resolver_for(&directory)
        .resolve(Some(&credential("tok-alice")), TeamId::new())
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn member_resolves_with_stored_team_role() {
    let directory = Arc::new(FakeAccessDirectory::default());
    let actor = directory.add_actor("tok-alice", "Alice").await;
    let team_id = TeamId::new();
    let membership = directory
        .add_membership(team_id, actor.actor_id(), Role::Member)
        .await;

    let result = resolver_for(&directory)
        .resolve(Some(&credential("tok-alice")), team_id)
        .await;

    let context = match result {
        Ok(context) => context,
        Err(error) => panic!("expected context, got {error}"),
    };
    assert_eq!(context.effective_role(), Role::Member);
    assert_eq!(context.membership(), Some(&membership));
    assert_eq!(context.actor(), &actor);
}

#[tokio::test]
async fn roles_are_evaluated_per_team() {
    let directory = Arc::new(FakeAccessDirectory::default());
    let actor = directory.add_actor("tok-alice", "Alice").await;
    let first_team = TeamId::new();
    let second_team = TeamId::new();
    directory
        .add_membership(first_team, actor.actor_id(), Role::Viewer)
        .await;
    directory
        .add_membership(second_team, actor.actor_id(), Role::Admin)
        .await;
    let resolver = resolver_for(&directory);

    let first = resolver
        .resolve(Some(&credential("tok-alice")), first_team)
        .await;
    let second = resolver
        .resolve(Some(&credential("tok-alice")), second_team)
        .await;

    assert!(matches!(first, Ok(context) if context.effective_role() == Role::Viewer));
    assert!(matches!(second, Ok(context) if context.effective_role() == Role::Admin));
}

#[tokio::test]
async fn missing_credential_is_unauthorized_without_store_calls() {
    let directory = Arc::new(FakeAccessDirectory::default());

    let result = resolver_for(&directory).resolve(None, TeamId::new()).await;

    assert!(matches!(result, Err(AppError::Unauthorized(_))));
    assert_eq!(directory.store_calls(), 0);
}

#[tokio::test]
async fn unknown_credential_is_unauthorized() {
    let directory = Arc::new(FakeAccessDirectory::default());

    let result = resolver_for(&directory)
        .resolve(Some(&credential("tok-forged")), TeamId::new())
        .await;

    assert!(matches!(result, Err(AppError::Unauthorized(_))));
    assert_eq!(directory.profile_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn store_failure_is_internal_not_a_denial() {
    let directory = Arc::new(FakeAccessDirectory::default());
    directory.add_actor("tok-alice", "Alice").await;
    directory.fail_profile_lookups.store(true, Ordering::SeqCst);

    let result = resolver_for(&directory)
        .resolve(Some(&credential("tok-alice")), TeamId::new())
        .await;

    assert!(matches!(result, Err(AppError::Internal(_))));
    assert_eq!(directory.membership_calls.load(Ordering::SeqCst), 0);
}
