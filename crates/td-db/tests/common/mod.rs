use td_core::{Board, List, Task, UserSummary};
use td_db::{BoardRepository, ListRepository, TaskRepository, UserRepository};

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use uuid::Uuid;

/// Creates an in-memory SQLite pool with migrations run.
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // in-memory needs a single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

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

pub async fn create_test_list(pool: &SqlitePool, board_id: Uuid, title: &str, position: i32) -> List {
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
