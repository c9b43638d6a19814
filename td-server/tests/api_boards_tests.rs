mod common;

use crate::common::{
    create_test_app_state, create_test_board, create_test_list, create_test_task, create_test_user,
};

use td_core::UserSummary;
use td_db::{BoardRepository, ListRepository, TaskRepository};
use td_server::build_router;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    user: &UserSummary,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("X-User-Id", user.id.to_string())
        .header("X-Username", &user.username);
    let request = match body {
        Some(value) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

#[tokio::test]
async fn test_create_board_makes_principal_owner() {
    let state = create_test_app_state().await;
    let alice = create_test_user(&state.pool, "alice").await;
    let app = build_router(state.clone());

    let (status, json) = send(
        app,
        "POST",
        "/api/boards",
        &alice,
        Some(json!({ "title": "Roadmap" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Roadmap");
    assert_eq!(json["ownerId"], alice.id.to_string());
}

#[tokio::test]
async fn test_create_board_rejects_blank_title() {
    let state = create_test_app_state().await;
    let alice = create_test_user(&state.pool, "alice").await;
    let app = build_router(state.clone());

    let (status, json) = send(
        app,
        "POST",
        "/api/boards",
        &alice,
        Some(json!({ "title": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_boards_includes_owned_and_shared() {
    let state = create_test_app_state().await;
    let alice = create_test_user(&state.pool, "alice").await;
    let bob = create_test_user(&state.pool, "bob").await;
    let owned = create_test_board(&state.pool, alice.id, "Mine").await;
    let shared = create_test_board(&state.pool, bob.id, "Shared").await;
    BoardRepository::add_collaborator(&state.pool, shared.id, alice.id)
        .await
        .unwrap();
    create_test_board(&state.pool, bob.id, "Private").await;

    let app = build_router(state.clone());
    let (status, json) = send(app, "GET", "/api/boards", &alice, None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json["boards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&owned.id.to_string().as_str()));
    assert!(ids.contains(&shared.id.to_string().as_str()));
}

#[tokio::test]
async fn test_get_board_nests_lists_and_tasks_in_position_order() {
    let state = create_test_app_state().await;
    let alice = create_test_user(&state.pool, "alice").await;
    let board = create_test_board(&state.pool, alice.id, "Board").await;
    let done = create_test_list(&state.pool, board.id, "Done", 1).await;
    let todo = create_test_list(&state.pool, board.id, "Todo", 0).await;
    // Insert out of position order on purpose
    create_test_task(&state.pool, todo.id, board.id, "Second", 1).await;
    let first = create_test_task(&state.pool, todo.id, board.id, "First", 0).await;
    TaskRepository::add_assignee(&state.pool, first.id, alice.id)
        .await
        .unwrap();

    let app = build_router(state.clone());
    let (status, json) = send(
        app,
        "GET",
        &format!("/api/boards/{}", board.id),
        &alice,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let lists = json["lists"].as_array().unwrap();
    assert_eq!(lists[0]["id"], todo.id.to_string());
    assert_eq!(lists[1]["id"], done.id.to_string());

    let tasks = lists[0]["tasks"].as_array().unwrap();
    assert_eq!(tasks[0]["title"], "First");
    assert_eq!(tasks[1]["title"], "Second");
    assert_eq!(tasks[0]["assignees"][0]["username"], "alice");
}

#[tokio::test]
async fn test_get_board_hidden_from_strangers() {
    let state = create_test_app_state().await;
    let alice = create_test_user(&state.pool, "alice").await;
    let mallory = create_test_user(&state.pool, "mallory").await;
    let board = create_test_board(&state.pool, alice.id, "Private").await;

    let app = build_router(state.clone());
    let (status, json) = send(
        app,
        "GET",
        &format!("/api/boards/{}", board.id),
        &mallory,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_rename_board_is_owner_only() {
    let state = create_test_app_state().await;
    let alice = create_test_user(&state.pool, "alice").await;
    let bob = create_test_user(&state.pool, "bob").await;
    let board = create_test_board(&state.pool, alice.id, "Old name").await;
    BoardRepository::add_collaborator(&state.pool, board.id, bob.id)
        .await
        .unwrap();

    let app = build_router(state.clone());

    // Collaborator is rejected like a stranger
    let (status, _) = send(
        app.clone(),
        "PUT",
        &format!("/api/boards/{}", board.id),
        &bob,
        Some(json!({ "title": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Owner succeeds
    let (status, json) = send(
        app,
        "PUT",
        &format!("/api/boards/{}", board.id),
        &alice,
        Some(json!({ "title": "New name" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "New name");
}

#[tokio::test]
async fn test_delete_board_cascades_to_lists_and_tasks() {
    let state = create_test_app_state().await;
    let alice = create_test_user(&state.pool, "alice").await;
    let board = create_test_board(&state.pool, alice.id, "Doomed").await;
    let list = create_test_list(&state.pool, board.id, "Todo", 0).await;
    let task = create_test_task(&state.pool, list.id, board.id, "Task", 0).await;

    let app = build_router(state.clone());
    let (status, json) = send(
        app.clone(),
        "DELETE",
        &format!("/api/boards/{}", board.id),
        &alice,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["deleted"], true);

    assert!(
        BoardRepository::find_by_id(&state.pool, board.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        ListRepository::find_by_id(&state.pool, list.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        TaskRepository::find_by_id(&state.pool, task.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_missing_identity_header_is_unauthorized() {
    let state = create_test_app_state().await;
    let app = build_router(state.clone());

    let request = Request::builder()
        .method("GET")
        .uri("/api/boards")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_board_is_not_found() {
    let state = create_test_app_state().await;
    let alice = create_test_user(&state.pool, "alice").await;
    let app = build_router(state.clone());

    let (status, _) = send(
        app,
        "GET",
        &format!("/api/boards/{}", Uuid::new_v4()),
        &alice,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
