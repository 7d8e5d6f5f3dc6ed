/// Integration tests for board lifecycle, membership and column limits

mod common;

use common::{error_of, in_days, registered_user, test_service};
use kanban_shared::kanban::ErrorKind;

#[tokio::test]
async fn test_create_and_view_board() {
    let (_pool, mut service) = test_service().await;
    let owner = registered_user(&mut service).await;

    let created = service.create_board(&owner, "My Sprint").await;
    let view = created.return_value.expect("board view");
    assert_eq!(view.board_name, "my sprint");
    assert_eq!(view.owner, owner);
    assert_eq!(view.collaborators, vec![owner.clone()]);
    let names: Vec<_> = view.columns.iter().map(|c| c.column_name.as_str()).collect();
    assert_eq!(names, vec!["backlog", "in progress", "done"]);

    let fetched = service.get_board(&owner, "MY SPRINT").return_value.unwrap();
    assert_eq!(fetched, view);
    assert_eq!(service.get_board_name(view.id).return_value.as_deref(), Some("my sprint"));
}

#[tokio::test]
async fn test_board_name_rules() {
    let (_pool, mut service) = test_service().await;
    let owner = registered_user(&mut service).await;

    assert_eq!(error_of(service.create_board(&owner, "   ").await), "Invalid board name.");
    assert!(error_of(service.create_board(&owner, &"x".repeat(51)).await).contains("too long"));

    service.create_board(&owner, "sprint").await;
    let duplicate = service.create_board(&owner, "Sprint").await;
    assert_eq!(duplicate.error_kind, Some(ErrorKind::Conflict));
    assert_eq!(error_of(duplicate), "Board with this name already exists.");
}

#[tokio::test]
async fn test_only_owner_deletes() {
    let (_pool, mut service) = test_service().await;
    let owner = registered_user(&mut service).await;
    let member = registered_user(&mut service).await;

    let board_id = service.create_board(&owner, "sprint").await.return_value.unwrap().id;
    service.join_board(&member, board_id).await;

    let denied = service.delete_board(&member, "sprint").await;
    assert_eq!(denied.error_kind, Some(ErrorKind::Forbidden));

    assert!(service.delete_board(&owner, "sprint").await.is_ok());
    assert_eq!(error_of(service.get_board_name(board_id)), "Board does not exist.");
    assert!(service.get_user_boards(&member).return_value.unwrap().is_empty());
}

#[tokio::test]
async fn test_board_ids_are_not_reused() {
    let (_pool, mut service) = test_service().await;
    let owner = registered_user(&mut service).await;

    let first = service.create_board(&owner, "a").await.return_value.unwrap().id;
    service.delete_board(&owner, "a").await;
    let second = service.create_board(&owner, "a").await.return_value.unwrap().id;

    assert!(second > first);
}

#[tokio::test]
async fn test_join_and_leave() {
    let (_pool, mut service) = test_service().await;
    let owner = registered_user(&mut service).await;
    let member = registered_user(&mut service).await;
    let board_id = service.create_board(&owner, "sprint").await.return_value.unwrap().id;

    assert_eq!(error_of(service.join_board(&member, 999).await), "Board does not exist.");
    assert!(service.join_board(&member, board_id).await.is_ok());
    assert_eq!(
        error_of(service.join_board(&member, board_id).await),
        "User already joined this board."
    );
    assert_eq!(service.get_user_boards(&member).return_value, Some(vec![board_id]));

    assert_eq!(
        error_of(service.leave_board(&owner, board_id).await),
        "Board owner cannot leave the board."
    );
    assert!(service.leave_board(&member, board_id).await.is_ok());
    assert!(error_of(service.leave_board(&member, board_id).await).contains("is not a member"));
}

#[tokio::test]
async fn test_join_rejects_name_clash() {
    let (_pool, mut service) = test_service().await;
    let alice = registered_user(&mut service).await;
    let bob = registered_user(&mut service).await;

    let alice_board = service.create_board(&alice, "sprint").await.return_value.unwrap().id;
    service.create_board(&bob, "sprint").await;

    assert_eq!(
        error_of(service.join_board(&bob, alice_board).await),
        "Board with this name already exists."
    );
}

#[tokio::test]
async fn test_leaving_unassigns_tasks() {
    let (_pool, mut service) = test_service().await;
    let owner = registered_user(&mut service).await;
    let member = registered_user(&mut service).await;
    let board_id = service.create_board(&owner, "sprint").await.return_value.unwrap().id;
    service.join_board(&member, board_id).await;

    let task = service
        .create_task(&owner, "sprint", "Write docs", "", in_days(2))
        .await
        .return_value
        .unwrap();
    assert!(service.assign_task(&owner, "sprint", 0, task.id, &member).await.is_ok());

    service.leave_board(&member, board_id).await;

    let backlog = service.get_column(&owner, "sprint", 0).return_value.unwrap();
    assert_eq!(backlog[0].assignee, None);
}

#[tokio::test]
async fn test_change_owner() {
    let (_pool, mut service) = test_service().await;
    let owner = registered_user(&mut service).await;
    let member = registered_user(&mut service).await;
    let outsider = registered_user(&mut service).await;
    let board_id = service.create_board(&owner, "sprint").await.return_value.unwrap().id;
    service.join_board(&member, board_id).await;

    let not_member = service.change_owner(&owner, "sprint", &outsider).await;
    assert_eq!(not_member.error_kind, Some(ErrorKind::Forbidden));

    let not_owner = service.change_owner(&member, "sprint", &member).await;
    assert_eq!(not_owner.error_kind, Some(ErrorKind::Forbidden));

    assert!(service.change_owner(&owner, "sprint", &member).await.is_ok());
    assert_eq!(service.get_board(&owner, "sprint").return_value.unwrap().owner, member);

    // The previous owner is now an ordinary collaborator and may leave
    assert!(service.leave_board(&owner, board_id).await.is_ok());
}

#[tokio::test]
async fn test_column_limits() {
    let (_pool, mut service) = test_service().await;
    let owner = registered_user(&mut service).await;
    service.create_board(&owner, "sprint").await;

    assert_eq!(service.get_column_limit(&owner, "sprint", 0).return_value, Some(-1));
    assert_eq!(
        service.get_column_name(&owner, "sprint", 1).return_value.as_deref(),
        Some("in progress")
    );
    assert_eq!(error_of(service.get_column_name(&owner, "sprint", 3)), "Invalid column index.");

    assert_eq!(
        error_of(service.limit_column(&owner, "sprint", 0, 0).await),
        "Invalid limit, new limit should be -1 or a positive integer."
    );
    assert!(service.limit_column(&owner, "sprint", 0, 1).await.is_ok());
    assert_eq!(service.get_column_limit(&owner, "sprint", 0).return_value, Some(1));

    service.create_task(&owner, "sprint", "one", "", in_days(1)).await;
    assert_eq!(
        error_of(service.create_task(&owner, "sprint", "two", "", in_days(1)).await),
        "Column has reached its task limit"
    );

    assert!(service.limit_column(&owner, "sprint", 0, -1).await.is_ok());
    service.create_task(&owner, "sprint", "two", "", in_days(1)).await;
    assert_eq!(
        error_of(service.limit_column(&owner, "sprint", 0, 1).await),
        "Invalid limit, new limit should be higher than current tasks count."
    );
}
