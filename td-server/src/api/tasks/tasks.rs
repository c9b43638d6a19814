//! Task REST API handlers, including the move coordinator behind
//! `PUT /api/tasks/{id}`.
//!
//! The coordinator owns the density invariant: after any successful call,
//! the tasks of every touched list occupy positions `0..n-1` with no gaps
//! and no duplicates. All placement writes for one request happen in one
//! transaction; history and broadcasts follow the commit and are
//! best-effort.

use crate::api::audit::{record, record_activity};
use crate::api::publish::publish;
use crate::api::resolve::{
    board_task_views, require_board_member, resolve_list, resolve_task, task_view,
};
use crate::api::validate::{clean_description, clean_title};
use crate::{
    ApiError, ApiResult, CreateTaskRequest, CurrentUser, DeleteResponse, SearchTasksQuery,
    TaskSearchResponse, UpdateTaskRequest,
};
use crate::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use td_core::{Activity, ActivityLog, Priority, Task, TaskView, UserSummary, plan_move, reindex};
use td_db::{BoardRepository, TaskRepository, UserRepository};
use td_ws::{AppState, DeletedId, ServerEvent};

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/tasks
///
/// Create a task at the tail of its list and broadcast `taskCreated`.
pub async fn create_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<TaskView>> {
    let list = resolve_list(&state.pool, req.list_id).await?;
    require_board_member(&state.pool, list.board_id, user.id).await?;

    let title = clean_title(&req.title, "title")?;
    let description = clean_description(req.description)?;
    let priority = match req.priority.as_deref() {
        Some(value) => Priority::from_str(value)?,
        None => Priority::default(),
    };

    let position = TaskRepository::count_by_list(&state.pool, list.id).await? as i32;
    let mut task = Task::new(title, description, list.id, list.board_id, position);
    task.priority = priority;
    task.deadline = req.deadline;

    let mut tx = state.pool.begin().await?;
    TaskRepository::create(&mut *tx, &task).await?;
    if let Some(ref name) = req.assignee_name {
        let assignee = resolve_assignee(&mut tx, name).await?;
        TaskRepository::add_assignee(&mut *tx, task.id, assignee.id).await?;
        BoardRepository::add_collaborator(&mut *tx, task.board_id, assignee.id).await?;
        task.assignees.push(assignee.id);
    }
    tx.commit().await?;

    log::info!("User {} created task {} in list {}", user.username, task.id, list.id);

    let view = task_view(&state.pool, task.clone()).await?;
    publish(&state, task.board_id, &ServerEvent::TaskCreated(view.clone())).await;

    let log = ActivityLog::task_created(user.id, task.board_id, task.list_id, task.id, &task.title);
    let activity = Activity::new(
        task.board_id,
        Some(user.id),
        user.username.clone(),
        format!("{} created task \"{}\"", user.username, task.title),
    );
    record(&state, log, activity).await;

    Ok(Json(view))
}

/// GET /api/tasks?listId|boardId&q&page&limit
///
/// Paged substring search, newest first.
pub async fn search_tasks(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<SearchTasksQuery>,
) -> ApiResult<Json<TaskSearchResponse>> {
    let (board_id, list_id) = match (query.board_id, query.list_id) {
        (_, Some(list_id)) => {
            let list = resolve_list(&state.pool, list_id).await?;
            (list.board_id, Some(list_id))
        }
        (Some(board_id), None) => (board_id, None),
        (None, None) => {
            return Err(ApiError::validation(
                "boardId or listId is required",
                Some("boardId"),
            ));
        }
    };
    require_board_member(&state.pool, board_id, user.id).await?;

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = (page - 1) * limit;
    let needle = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let (tasks, total) =
        TaskRepository::search(&state.pool, board_id, list_id, needle, limit, offset).await?;
    let views = board_task_views(&state.pool, board_id, tasks).await?;

    Ok(Json(TaskSearchResponse {
        tasks: views,
        total,
        page,
        total_pages: (total + limit - 1) / limit,
    }))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskView>> {
    let task = resolve_task(&state.pool, id).await?;
    require_board_member(&state.pool, task.board_id, user.id).await?;

    Ok(Json(task_view(&state.pool, task).await?))
}

/// PUT /api/tasks/{id} - the move coordinator.
///
/// One endpoint serves repositioning (listId/position) and field edits;
/// a request may carry both. Placement is always planned against the
/// current database order and rewritten wholesale for every touched list.
pub async fn update_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskView>> {
    let task = resolve_task(&state.pool, id).await?;
    require_board_member(&state.pool, task.board_id, user.id).await?;

    let source_list_id = task.list_id;
    let target_list_id = req.list_id.unwrap_or(source_list_id);
    let moving_lists = target_list_id != source_list_id;

    if moving_lists {
        let dest = resolve_list(&state.pool, target_list_id).await?;
        if dest.board_id != task.board_id {
            return Err(ApiError::invalid_target(format!(
                "List {} belongs to a different board",
                dest.id
            )));
        }
    }

    // Apply field edits against a copy; placement is merged in below.
    let mut subject = task.clone();
    let mut fields_changed = false;
    if let Some(ref title) = req.title {
        let title = clean_title(title, "title")?;
        if title != subject.title {
            subject.title = title;
            fields_changed = true;
        }
    }
    if let Some(description) = req.description.clone() {
        let description = clean_description(description)?;
        if description != subject.description {
            subject.description = description;
            fields_changed = true;
        }
    }
    if let Some(ref priority) = req.priority {
        let priority = Priority::from_str(priority)?;
        if priority != subject.priority {
            subject.priority = priority;
            fields_changed = true;
        }
    }
    if let Some(deadline) = req.deadline {
        if deadline != subject.deadline {
            subject.deadline = deadline;
            fields_changed = true;
        }
    }

    let wants_assignee_changes = req.assignees.is_some() || req.assignee_name.is_some();
    if let Some(ref ids) = req.assignees {
        // Reject unknown users before any write; the FK would otherwise
        // surface as a 500 mid-transaction.
        let found = UserRepository::find_summaries(&state.pool, ids).await?;
        if found.len() != unique_count(ids) {
            return Err(ApiError::not_found("One or more assignees not found"));
        }
    }

    // Plan placement against the current order of the touched lists.
    let placement_requested = moving_lists || req.position.is_some();
    let plan = if placement_requested {
        let source = TaskRepository::find_by_list(&state.pool, source_list_id).await?;
        let dest = if moving_lists {
            let dest_tasks = TaskRepository::find_by_list(&state.pool, target_list_id).await?;
            Some((target_list_id, dest_tasks))
        } else {
            None
        };
        // Omitted position on a cross-list move appends to the tail.
        let dest_index = match req.position {
            Some(position) => position.max(0) as usize,
            None => dest.as_ref().map(|(_, tasks)| tasks.len()).unwrap_or(0),
        };
        Some(plan_move(source_list_id, source, dest, id, dest_index)?)
    } else {
        None
    };

    let mut displaced = Vec::new();
    let mut placement_no_op = true;
    if let Some(plan) = plan {
        subject.list_id = plan.subject.list_id;
        subject.position = plan.subject.position;
        displaced = plan.others;
        placement_no_op = plan.no_op;
    }

    // Strict no-op: no writes, no history, no broadcast.
    if placement_no_op && !fields_changed && !wants_assignee_changes {
        log::debug!("No-op update for task {}", id);
        return Ok(Json(task_view(&state.pool, task).await?));
    }

    let subject_repositioned =
        subject.list_id != source_list_id || subject.position != task.position;
    subject.updated_at = Utc::now();

    let mut assigned: Option<UserSummary> = None;
    let mut tx = state.pool.begin().await?;
    TaskRepository::update(&mut *tx, &subject).await?;
    for other in &displaced {
        TaskRepository::update_placement(&mut *tx, other.id, other.list_id, other.position).await?;
    }
    if let Some(ref ids) = req.assignees {
        TaskRepository::replace_assignees(&mut *tx, subject.id, ids).await?;
    }
    if let Some(ref name) = req.assignee_name {
        let assignee = resolve_assignee(&mut tx, name).await?;
        TaskRepository::add_assignee(&mut *tx, subject.id, assignee.id).await?;
        BoardRepository::add_collaborator(&mut *tx, subject.board_id, assignee.id).await?;
        assigned = Some(assignee);
    }
    tx.commit().await?;

    // Post-commit: fan out the subject, every displaced neighbor, and the
    // history row.
    let view = task_view(&state.pool, subject.clone()).await?;
    let subject_event = if subject_repositioned {
        ServerEvent::TaskMoved(view.clone())
    } else {
        ServerEvent::TaskUpdated(view.clone())
    };
    publish(&state, subject.board_id, &subject_event).await;

    let displaced_views = board_task_views(&state.pool, subject.board_id, displaced).await?;
    for displaced_view in displaced_views {
        publish(
            &state,
            subject.board_id,
            &ServerEvent::TaskUpdated(displaced_view),
        )
        .await;
    }

    let log = if moving_lists {
        ActivityLog::task_moved(
            user.id,
            subject.board_id,
            source_list_id,
            subject.list_id,
            subject.id,
        )
    } else {
        ActivityLog::task_updated(user.id, subject.board_id, subject.list_id, subject.id, &subject.title)
    };
    let action = describe_update(&user, &task, &subject, subject_repositioned, assigned.as_ref());
    let activity = Activity::new(subject.board_id, Some(user.id), user.username.clone(), action);
    record(&state, log, activity).await;

    Ok(Json(view))
}

/// DELETE /api/tasks/{id}
///
/// Delete the task and close the gap it leaves in its list.
pub async fn delete_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    let task = resolve_task(&state.pool, id).await?;
    require_board_member(&state.pool, task.board_id, user.id).await?;

    let mut tx = state.pool.begin().await?;
    TaskRepository::delete(&mut *tx, task.id).await?;
    let mut remaining = TaskRepository::find_by_list(&mut *tx, task.list_id).await?;
    let changed = reindex(&mut remaining);
    for compacted in remaining.iter().filter(|t| changed.contains(&t.id)) {
        TaskRepository::update_placement(&mut *tx, compacted.id, compacted.list_id, compacted.position)
            .await?;
    }
    tx.commit().await?;

    log::info!("User {} deleted task {} from list {}", user.username, task.id, task.list_id);

    publish(
        &state,
        task.board_id,
        &ServerEvent::TaskDeleted(DeletedId { id: task.id }),
    )
    .await;

    let log = ActivityLog::task_deleted(user.id, task.board_id, task.list_id, task.id, &task.title);
    let activity = Activity::new(
        task.board_id,
        Some(user.id),
        user.username.clone(),
        format!("{} deleted task \"{}\"", user.username, task.title),
    );
    record(&state, log, activity).await;

    Ok(Json(DeleteResponse {
        deleted: true,
        id: task.id,
    }))
}

// =============================================================================
// Helpers
// =============================================================================

async fn resolve_assignee(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    username: &str,
) -> ApiResult<UserSummary> {
    UserRepository::find_by_username(&mut **tx, username)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", username)))
}

fn unique_count(ids: &[Uuid]) -> usize {
    let mut sorted: Vec<Uuid> = ids.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted.len()
}

/// Human-readable phrasing for the activity feed.
fn describe_update(
    user: &UserSummary,
    before: &Task,
    after: &Task,
    repositioned: bool,
    assigned: Option<&UserSummary>,
) -> String {
    if repositioned {
        format!("{} moved task \"{}\"", user.username, after.title)
    } else if let Some(assignee) = assigned {
        format!(
            "{} assigned {} to \"{}\"",
            user.username, assignee.username, after.title
        )
    } else if before.priority != after.priority {
        format!(
            "{} changed priority of \"{}\" to {}",
            user.username,
            after.title,
            after.priority.as_str()
        )
    } else {
        format!("{} updated task \"{}\"", user.username, after.title)
    }
}
