#![allow(dead_code)]

//! Test infrastructure for td-server API tests

use td_core::{Board, List, Task, UserSummary};
use td_db::{BoardRepository, ListRepository, TaskRepository, UserRepository};
use td_ws::{AppState, BoardBroadcaster, BroadcastConfig, ConnectionConfig, Metrics};

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use uuid::Uuid;

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // in-memory needs a single connection
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("Failed to enable foreign keys");

    td_db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing (auth disabled, X-User-Id trusted)
pub async fn create_test_app_state() -> AppState {
    let pool = create_test_pool().await;

    AppState {
        pool,
        broadcaster: BoardBroadcaster::new(BroadcastConfig::default()),
        jwt_validator: None,
        metrics: Metrics::new(),
        connection_config: ConnectionConfig::default(),
    }
}

pub async fn create_test_user(pool: &SqlitePool, username: &str) -> UserSummary {
    let user = UserSummary {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: format!("{}@example.com", username),
    };
    UserRepository::create(pool, &user)
        .await
        .expect("Failed to insert user");
    user
}

pub async fn create_test_board(pool: &SqlitePool, owner_id: Uuid, title: &str) -> Board {
    let board = Board::new(title.to_string(), owner_id);
    BoardRepository::create(pool, &board)
        .await
        .expect("Failed to insert board");
    board
}

pub async fn create_test_list(
    pool: &SqlitePool,
    board_id: Uuid,
    title: &str,
    position: i32,
) -> List {
    let list = List::new(title.to_string(), board_id, position);
    ListRepository::create(pool, &list)
        .await
        .expect("Failed to insert list");
    list
}

pub async fn create_test_task(
    pool: &SqlitePool,
    list_id: Uuid,
    board_id: Uuid,
    title: &str,
    position: i32,
) -> Task {
    let task = Task::new(title.to_string(), None, list_id, board_id, position);
    TaskRepository::create(pool, &task)
        .await
        .expect("Failed to insert task");
    task
}

/// Positions of a list's tasks in order, straight from the database.
pub async fn list_positions(pool: &SqlitePool, list_id: Uuid) -> Vec<(Uuid, i32)> {
    TaskRepository::find_by_list(pool, list_id)
        .await
        .expect("Failed to load list tasks")
        .into_iter()
        .map(|t| (t.id, t.position))
        .collect()
}
