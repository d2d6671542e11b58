use crate::access::{
    AccessService, AccessServiceTrait, AccessStatus, NewInvitation, Role,
};
use crate::errors::Error;
use crate::test_support::MemoryLedger;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn setup() -> (MemoryLedger, AccessService) {
    let ledger = MemoryLedger::new();
    ledger.add_wallet("w1", "usd", dec!(100), false);
    ledger.grant("w1", "owner", Role::Owner);
    ledger.grant("w1", "manager", Role::Manager);
    ledger.grant("w1", "editor", Role::Editor);
    let service = AccessService::new(Arc::new(ledger.clone()), Arc::new(ledger.clone()));
    (ledger, service)
}

fn invitation(user_id: &str, role: Role) -> NewInvitation {
    NewInvitation {
        user_id: user_id.to_string(),
        role,
    }
}

#[tokio::test]
async fn test_manager_invites_pending_member() {
    let (_, service) = setup();

    let record = service
        .invite_user("w1", "manager", invitation("guest", Role::Viewer))
        .await
        .unwrap();

    assert!(matches!(record.status, AccessStatus::Pending { .. }));
    assert_eq!(service.role_of("w1", "guest").unwrap(), None);
    assert_eq!(service.list_invitations("guest").unwrap().len(), 1);
}

#[tokio::test]
async fn test_editor_cannot_invite() {
    let (_, service) = setup();

    let result = service
        .invite_user("w1", "editor", invitation("guest", Role::Viewer))
        .await;

    assert!(matches!(result, Err(Error::PermissionDenied(_))));
}

#[tokio::test]
async fn test_manager_cannot_invite_above_own_role() {
    let (_, service) = setup();

    let result = service
        .invite_user("w1", "manager", invitation("guest", Role::Owner))
        .await;
    assert!(matches!(result, Err(Error::PermissionDenied(_))));

    service
        .invite_user("w1", "owner", invitation("guest", Role::Owner))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_duplicate_invitation_is_rejected() {
    let (_, service) = setup();

    let result = service
        .invite_user("w1", "owner", invitation("editor", Role::Manager))
        .await;

    assert!(matches!(result, Err(Error::ConstraintViolation(_))));
}

#[tokio::test]
async fn test_invite_on_unknown_wallet() {
    let (_, service) = setup();

    let result = service
        .invite_user("nope", "owner", invitation("guest", Role::Viewer))
        .await;

    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_accept_invitation_grants_role() {
    let (ledger, service) = setup();
    let pending = ledger.invite("w1", "guest", Role::Editor);

    let denied = service.accept_invitation(&pending.id, "someone-else").await;
    assert!(matches!(denied, Err(Error::PermissionDenied(_))));

    let accepted = service.accept_invitation(&pending.id, "guest").await.unwrap();
    assert!(accepted.status.is_granted());
    assert_eq!(service.role_of("w1", "guest").unwrap(), Some(Role::Editor));

    let again = service.accept_invitation(&pending.id, "guest").await;
    assert!(matches!(again, Err(Error::ConstraintViolation(_))));
}

#[tokio::test]
async fn test_decline_invitation_removes_it() {
    let (ledger, service) = setup();
    let pending = ledger.invite("w1", "guest", Role::Viewer);

    service.decline_invitation(&pending.id, "guest").await.unwrap();

    assert!(service.list_invitations("guest").unwrap().is_empty());
    assert_eq!(service.list_members("w1", "owner").unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_members_requires_grant() {
    let (ledger, service) = setup();
    ledger.invite("w1", "guest", Role::Viewer);

    assert_eq!(service.list_members("w1", "editor").unwrap().len(), 4);
    assert!(matches!(
        service.list_members("w1", "guest"),
        Err(Error::PermissionDenied(_))
    ));
}

#[tokio::test]
async fn test_revoke_rules() {
    let (_, service) = setup();

    let by_editor = service.revoke_access("w1", "editor", "manager").await;
    assert!(matches!(by_editor, Err(Error::PermissionDenied(_))));

    let owner_by_manager = service.revoke_access("w1", "manager", "owner").await;
    assert!(matches!(owner_by_manager, Err(Error::PermissionDenied(_))));

    service.revoke_access("w1", "manager", "editor").await.unwrap();
    assert_eq!(service.role_of("w1", "editor").unwrap(), None);
}

#[tokio::test]
async fn test_member_can_leave_wallet() {
    let (_, service) = setup();

    service.revoke_access("w1", "editor", "editor").await.unwrap();

    assert_eq!(service.role_of("w1", "editor").unwrap(), None);
}

#[tokio::test]
async fn test_revoke_unknown_member() {
    let (_, service) = setup();

    let result = service.revoke_access("w1", "owner", "ghost").await;

    assert!(matches!(result, Err(Error::NotFound(_))));
}
