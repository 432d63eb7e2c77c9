use std::sync::Arc;
use std::sync::atomic::Ordering;

use teamgate_core::{AppError, TeamId};
use teamgate_domain::{AuditAction, MembershipId, Role, TeamMembership};

use crate::AuthorizationContext;
use crate::test_support::{FakeAccessDirectory, FakeAuditRepository, credential, resolver_for};

use super::TeamMemberService;

struct Fixture {
    directory: Arc<FakeAccessDirectory>,
    audit: Arc<FakeAuditRepository>,
    service: TeamMemberService,
    team_id: TeamId,
}

impl Fixture {
    fn new() -> Self {
        let directory = Arc::new(FakeAccessDirectory::default());
        let audit = Arc::new(FakeAuditRepository::default());
        let service = TeamMemberService::new(directory.clone(), audit.clone());
        Self {
            directory,
            audit,
            service,
            team_id: TeamId::new(),
        }
    }

    async fn member(&self, token: &str, role: Role) -> TeamMembership {
        let actor = self.directory.add_actor(token, token).await;
        self.directory
            .add_membership(self.team_id, actor.actor_id(), role)
            .await
    }

    async fn context(&self, token: &str) -> AuthorizationContext {
        match resolver_for(&self.directory)
            .resolve(Some(&credential(token)), self.team_id)
            .await
        {
            Ok(context) => context,
            Err(error) => panic!("context for {token}: {error}"),
        }
    }
}

#[tokio::test]
async fn owner_promotes_member_to_admin_and_audits() {
    let fixture = Fixture::new();
    fixture.member("owner", Role::Owner).await;
    let target = fixture.member("bob", Role::Member).await;
    let context = fixture.context("owner").await;

    let result = fixture
        .service
        .change_member_role(&context, target.membership_id(), Role::Admin)
        .await;

    assert!(matches!(result, Ok(updated) if updated.role() == Role::Admin));
    let events = fixture.audit.events.lock().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, AuditAction::MemberRoleUpdated);
    assert_eq!(events[0].actor_id, context.actor().actor_id());
}

#[tokio::test]
async fn admin_cannot_promote_to_admin_or_touch_admins() {
    let fixture = Fixture::new();
    fixture.member("admin", Role::Admin).await;
    let member = fixture.member("bob", Role::Member).await;
    let peer = fixture.member("carol", Role::Admin).await;
    let context = fixture.context("admin").await;

    let promote = fixture
        .service
        .change_member_role(&context, member.membership_id(), Role::Admin)
        .await;
    assert!(matches!(promote, Err(AppError::InsufficientPermissions(_))));

    let demote_peer = fixture
        .service
        .change_member_role(&context, peer.membership_id(), Role::Viewer)
        .await;
    assert!(matches!(
        demote_peer,
        Err(AppError::InsufficientPermissions(_))
    ));

    let remove_peer = fixture
        .service
        .remove_member(&context, peer.membership_id())
        .await;
    assert!(matches!(
        remove_peer,
        Err(AppError::InsufficientPermissions(_))
    ));
    assert!(fixture.audit.events.lock().await.is_empty());
}

#[tokio::test]
async fn owner_role_is_never_assigned_or_changed() {
    let fixture = Fixture::new();
    let owner = fixture.member("owner", Role::Owner).await;
    let member = fixture.member("bob", Role::Member).await;
    let root = fixture.directory.add_actor("root", "Root").await;
    fixture
        .directory
        .set_global_role(root.actor_id(), Role::SuperAdmin)
        .await;
    let context = fixture.context("root").await;

    let to_owner = fixture
        .service
        .change_member_role(&context, member.membership_id(), Role::Owner)
        .await;
    assert!(matches!(to_owner, Err(AppError::Validation(_))));

    let from_owner = fixture
        .service
        .change_member_role(&context, owner.membership_id(), Role::Admin)
        .await;
    assert!(matches!(from_owner, Err(AppError::Validation(_))));

    let remove_owner = fixture
        .service
        .remove_member(&context, owner.membership_id())
        .await;
    assert!(matches!(remove_owner, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn admin_removes_viewer() {
    let fixture = Fixture::new();
    fixture.member("admin", Role::Admin).await;
    let viewer = fixture.member("vic", Role::Viewer).await;
    let context = fixture.context("admin").await;

    let result = fixture
        .service
        .remove_member(&context, viewer.membership_id())
        .await;

    assert!(result.is_ok());
    let remaining = fixture.service.list_members(&context).await;
    assert!(matches!(remaining, Ok(members) if members.len() == 1));
}

#[tokio::test]
async fn unknown_membership_is_not_found() {
    let fixture = Fixture::new();
    fixture.member("owner", Role::Owner).await;
    let context = fixture.context("owner").await;

    let result = fixture
        .service
        .remove_member(&context, MembershipId::new())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn promotion_between_read_and_write_blocks_admin_mutations() {
    let fixture = Fixture::new();
    fixture.member("admin", Role::Admin).await;
    let target = fixture.member("bob", Role::Member).await;
    let context = fixture.context("admin").await;

    fixture
        .directory
        .change_role_after_lookup(target.membership_id(), Role::Admin)
        .await;
    let demote = fixture
        .service
        .change_member_role(&context, target.membership_id(), Role::Viewer)
        .await;
    assert!(matches!(demote, Err(AppError::NotFound(_))));

    let remove = fixture
        .service
        .remove_member(&context, target.membership_id())
        .await;
    assert!(matches!(
        remove,
        Err(AppError::InsufficientPermissions(_))
    ));

    let members = fixture.service.list_members(&context).await;
    assert!(matches!(
        members,
        Ok(ref members) if members.iter().any(|membership| {
            membership.membership_id() == target.membership_id()
                && membership.role() == Role::Admin
        })
    ));
    assert!(fixture.audit.events.lock().await.is_empty());
}

#[tokio::test]
async fn removal_racing_a_promotion_is_not_found() {
    let fixture = Fixture::new();
    fixture.member("admin", Role::Admin).await;
    let target = fixture.member("vic", Role::Viewer).await;
    let context = fixture.context("admin").await;

    fixture
        .directory
        .change_role_after_lookup(target.membership_id(), Role::Admin)
        .await;
    let remove = fixture
        .service
        .remove_member(&context, target.membership_id())
        .await;

    assert!(matches!(remove, Err(AppError::NotFound(_))));
    let members = fixture.service.list_members(&context).await;
    assert!(matches!(members, Ok(ref members) if members.len() == 2));
    assert!(fixture.audit.events.lock().await.is_empty());
}

#[tokio::test]
async fn audit_failure_does_not_fail_the_mutation() {
    let fixture = Fixture::new();
    fixture.member("owner", Role::Owner).await;
    let target = fixture.member("bob", Role::Member).await;
    fixture.audit.fail_appends.store(true, Ordering::SeqCst);
    let context = fixture.context("owner").await;

    let result = fixture
        .service
        .change_member_role(&context, target.membership_id(), Role::Viewer)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn assignable_roles_follow_manage_relation() {
    let fixture = Fixture::new();
    fixture.member("owner", Role::Owner).await;
    fixture.member("admin", Role::Admin).await;
    fixture.member("bob", Role::Member).await;

    let owner = fixture.context("owner").await;
    let admin = fixture.context("admin").await;
    let member = fixture.context("bob").await;

    assert_eq!(
        fixture.service.assignable_roles(&owner),
        vec![Role::Admin, Role::Member, Role::Viewer]
    );
    assert_eq!(
        fixture.service.assignable_roles(&admin),
        vec![Role::Member, Role::Viewer]
    );
    assert!(fixture.service.assignable_roles(&member).is_empty());
}

#[tokio::test]
async fn audit_log_is_scoped_to_context_team() {
    let fixture = Fixture::new();
    fixture.member("owner", Role::Owner).await;
    let target = fixture.member("bob", Role::Member).await;
    let context = fixture.context("owner").await;

    let removed = fixture
        .service
        .remove_member(&context, target.membership_id())
        .await;
    assert!(removed.is_ok());

    let entries = fixture.service.list_audit_log(&context, 50, 0).await;
    assert!(matches!(
        entries.as_deref(),
        Ok([entry]) if entry.event.action == AuditAction::MemberRemoved
    ));
}
