mod common;

use common::{create_test_board, create_test_pool, create_test_user};

use td_db::BoardRepository;

use googletest::prelude::*;
use uuid::Uuid;

#[tokio::test]
async fn given_valid_board_when_created_then_can_be_found_by_id() {
    // Given: A test database with an owner
    let pool = create_test_pool().await;
    let owner = create_test_user(&pool, "alice").await;

    // When: Creating a board
    let board = create_test_board(&pool, owner.id, "Sprint Board").await;

    // Then: Finding by ID returns the board
    let found = BoardRepository::find_by_id(&pool, board.id)
        .await
        .unwrap()
        .unwrap();

    assert_that!(found.id, eq(board.id));
    assert_that!(found.title.as_str(), eq("Sprint Board"));
    assert_that!(found.owner_id, eq(owner.id));
}

#[tokio::test]
async fn given_empty_database_when_finding_nonexistent_board_then_returns_none() {
    let pool = create_test_pool().await;

    let result = BoardRepository::find_by_id(&pool, Uuid::new_v4())
        .await
        .unwrap();

    assert_that!(result, none());
}

#[tokio::test]
async fn given_board_when_accessed_by_owner_then_find_accessible_returns_it() {
    let pool = create_test_pool().await;
    let owner = create_test_user(&pool, "alice").await;
    let board = create_test_board(&pool, owner.id, "Mine").await;

    let result = BoardRepository::find_accessible(&pool, board.id, owner.id)
        .await
        .unwrap();

    assert_that!(result, some(anything()));
}

#[tokio::test]
async fn given_board_when_accessed_by_stranger_then_find_accessible_returns_none() {
    // Given: A board and an unrelated user
    let pool = create_test_pool().await;
    let owner = create_test_user(&pool, "alice").await;
    let stranger = create_test_user(&pool, "mallory").await;
    let board = create_test_board(&pool, owner.id, "Private").await;

    // When: The stranger looks it up
    let result = BoardRepository::find_accessible(&pool, board.id, stranger.id)
        .await
        .unwrap();

    // Then: The board is invisible to them
    assert_that!(result, none());
}

#[tokio::test]
async fn given_collaborator_when_added_then_they_can_access_the_board() {
    let pool = create_test_pool().await;
    let owner = create_test_user(&pool, "alice").await;
    let collaborator = create_test_user(&pool, "bob").await;
    let board = create_test_board(&pool, owner.id, "Shared").await;

    BoardRepository::add_collaborator(&pool, board.id, collaborator.id)
        .await
        .unwrap();

    let result = BoardRepository::find_accessible(&pool, board.id, collaborator.id)
        .await
        .unwrap();
    assert_that!(result, some(anything()));

    let ids = BoardRepository::collaborator_ids(&pool, board.id)
        .await
        .unwrap();
    assert_that!(ids, elements_are![eq(&collaborator.id)]);
}

#[tokio::test]
async fn given_duplicate_collaborator_when_added_twice_then_stored_once() {
    let pool = create_test_pool().await;
    let owner = create_test_user(&pool, "alice").await;
    let collaborator = create_test_user(&pool, "bob").await;
    let board = create_test_board(&pool, owner.id, "Shared").await;

    BoardRepository::add_collaborator(&pool, board.id, collaborator.id)
        .await
        .unwrap();
    BoardRepository::add_collaborator(&pool, board.id, collaborator.id)
        .await
        .unwrap();

    let ids = BoardRepository::collaborator_ids(&pool, board.id)
        .await
        .unwrap();
    assert_that!(ids.len(), eq(1));
}

#[tokio::test]
async fn given_user_with_owned_and_shared_boards_when_listing_then_both_appear() {
    // Given: One owned board and one shared board
    let pool = create_test_pool().await;
    let alice = create_test_user(&pool, "alice").await;
    let bob = create_test_user(&pool, "bob").await;

    let owned = create_test_board(&pool, alice.id, "Owned").await;
    let shared = create_test_board(&pool, bob.id, "Shared").await;
    BoardRepository::add_collaborator(&pool, shared.id, alice.id)
        .await
        .unwrap();
    // A board alice has nothing to do with
    create_test_board(&pool, bob.id, "Foreign").await;

    // When: Listing alice's boards
    let boards = BoardRepository::find_for_user(&pool, alice.id).await.unwrap();

    // Then: Exactly the owned and shared boards come back
    let mut ids: Vec<_> = boards.iter().map(|b| b.id).collect();
    ids.sort();
    let mut expected = vec![owned.id, shared.id];
    expected.sort();
    assert_that!(ids, eq(&expected));
}

#[tokio::test]
async fn given_board_with_children_when_deleted_then_everything_is_gone() {
    let pool = create_test_pool().await;
    let owner = create_test_user(&pool, "alice").await;
    let board = create_test_board(&pool, owner.id, "Doomed").await;
    let list = common::create_test_list(&pool, board.id, "Todo", 0).await;
    let task = common::create_test_task(&pool, list.id, board.id, "Orphan?", 0).await;
    td_db::TaskRepository::add_assignee(&pool, task.id, owner.id)
        .await
        .unwrap();

    BoardRepository::delete(&pool, board.id).await.unwrap();

    assert_that!(
        BoardRepository::find_by_id(&pool, board.id).await.unwrap(),
        none()
    );
    assert_that!(
        td_db::ListRepository::find_by_id(&pool, list.id).await.unwrap(),
        none()
    );
    assert_that!(
        td_db::TaskRepository::find_by_id(&pool, task.id).await.unwrap(),
        none()
    );
    let assignees = td_db::TaskRepository::assignee_ids(&pool, task.id)
        .await
        .unwrap();
    assert_that!(assignees, is_empty());
}

#[tokio::test]
async fn given_board_when_title_updated_then_new_title_is_persisted() {
    let pool = create_test_pool().await;
    let owner = create_test_user(&pool, "alice").await;
    let board = create_test_board(&pool, owner.id, "Old").await;

    BoardRepository::update_title(&pool, board.id, "New").await.unwrap();

    let found = BoardRepository::find_by_id(&pool, board.id)
        .await
        .unwrap()
        .unwrap();
    assert_that!(found.title.as_str(), eq("New"));
}
