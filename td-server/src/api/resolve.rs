//! Shared resolution helpers: ids to entities, entities to read models.
//!
//! Access is deliberately reported as `NOT_FOUND`: a principal who cannot
//! see a board learns nothing about whether it exists.

use crate::ApiError;

use td_core::{Board, List, Task, TaskView, UserSummary};
use td_db::{BoardRepository, ListRepository, TaskRepository, UserRepository};

use std::collections::HashMap;

use sqlx::SqlitePool;
use uuid::Uuid;

/// Resolve a board the principal may read and write (owner or collaborator).
pub async fn require_board_member(
    pool: &SqlitePool,
    board_id: Uuid,
    user_id: Uuid,
) -> Result<Board, ApiError> {
    BoardRepository::find_accessible(pool, board_id, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Board {} not found", board_id)))
}

/// Resolve a board the principal owns. Collaborators get the same `404`
/// as strangers for owner-only operations.
pub async fn require_board_owner(
    pool: &SqlitePool,
    board_id: Uuid,
    user_id: Uuid,
) -> Result<Board, ApiError> {
    let board = BoardRepository::find_by_id(pool, board_id)
        .await?
        .filter(|b| b.owner_id == user_id)
        .ok_or_else(|| ApiError::not_found(format!("Board {} not found", board_id)))?;

    Ok(board)
}

pub async fn resolve_task(pool: &SqlitePool, id: Uuid) -> Result<Task, ApiError> {
    TaskRepository::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Task {} not found", id)))
}

pub async fn resolve_list(pool: &SqlitePool, id: Uuid) -> Result<List, ApiError> {
    ListRepository::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("List {} not found", id)))
}

/// Denormalize one task's assignees into a `TaskView`.
pub async fn task_view(pool: &SqlitePool, task: Task) -> Result<TaskView, ApiError> {
    let ids = TaskRepository::assignee_ids(pool, task.id).await?;
    let assignees = UserRepository::find_summaries(pool, &ids).await?;

    Ok(TaskView::from_task(task, assignees))
}

/// Denormalize many tasks of one board in two queries instead of 2N.
pub async fn board_task_views(
    pool: &SqlitePool,
    board_id: Uuid,
    tasks: Vec<Task>,
) -> Result<Vec<TaskView>, ApiError> {
    let pairs = TaskRepository::assignees_for_board(pool, board_id).await?;

    let mut user_ids: Vec<Uuid> = pairs.iter().map(|(_, user_id)| *user_id).collect();
    user_ids.sort();
    user_ids.dedup();
    let users: HashMap<Uuid, UserSummary> = UserRepository::find_summaries(pool, &user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let mut by_task: HashMap<Uuid, Vec<UserSummary>> = HashMap::new();
    for (task_id, user_id) in pairs {
        if let Some(user) = users.get(&user_id) {
            by_task.entry(task_id).or_default().push(user.clone());
        }
    }

    Ok(tasks
        .into_iter()
        .map(|task| {
            let assignees = by_task.remove(&task.id).unwrap_or_default();
            TaskView::from_task(task, assignees)
        })
        .collect())
}
