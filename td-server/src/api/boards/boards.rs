//! Board REST API handlers
//!
//! Boards are the access boundary: every list, task, and activity request
//! below resolves through one of these membership checks.

use crate::api::audit::record_activity;
use crate::api::resolve::{board_task_views, require_board_member, require_board_owner};
use crate::api::validate::clean_title;
use crate::{
    ApiResult, BoardDetailResponse, BoardDto, BoardListResponse, CreateBoardRequest,
    CurrentUser, DeleteResponse, ListDetailDto, UpdateBoardRequest,
};

use td_core::{Activity, Board, TaskView};
use td_db::{BoardRepository, ListRepository, TaskRepository};
use td_ws::AppState;

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/boards
///
/// Create a board; the principal becomes its owner.
pub async fn create_board(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateBoardRequest>,
) -> ApiResult<Json<BoardDto>> {
    let title = clean_title(&req.title, "title")?;

    let board = Board::new(title, user.id);
    BoardRepository::create(&state.pool, &board).await?;

    log::info!("User {} created board {}", user.username, board.id);

    let activity = Activity::new(
        board.id,
        Some(user.id),
        user.username.clone(),
        format!("{} created board \"{}\"", user.username, board.title),
    );
    record_activity(&state, activity).await;

    Ok(Json(BoardDto::from_board(board, Vec::new())))
}

/// GET /api/boards
///
/// Boards the principal owns or collaborates on, newest first.
pub async fn list_boards(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<BoardListResponse>> {
    let boards = BoardRepository::find_for_user(&state.pool, user.id).await?;

    let mut dtos = Vec::with_capacity(boards.len());
    for board in boards {
        let collaborators = BoardRepository::collaborator_ids(&state.pool, board.id).await?;
        dtos.push(BoardDto::from_board(board, collaborators));
    }

    Ok(Json(BoardListResponse { boards: dtos }))
}

/// GET /api/boards/{id}
///
/// The board with its lists and nested tasks, both in position order.
pub async fn get_board(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BoardDetailResponse>> {
    let board = require_board_member(&state.pool, id, user.id).await?;
    let collaborators = BoardRepository::collaborator_ids(&state.pool, board.id).await?;

    let lists = ListRepository::find_by_board(&state.pool, board.id).await?;
    let tasks = TaskRepository::find_by_board(&state.pool, board.id).await?;
    let views = board_task_views(&state.pool, board.id, tasks).await?;

    let mut by_list: HashMap<Uuid, Vec<TaskView>> = HashMap::new();
    for view in views {
        by_list.entry(view.list_id).or_default().push(view);
    }

    let lists = lists
        .into_iter()
        .map(|list| {
            let mut tasks = by_list.remove(&list.id).unwrap_or_default();
            tasks.sort_by_key(|t| t.position);
            ListDetailDto::from_list(list, tasks)
        })
        .collect();

    Ok(Json(BoardDetailResponse {
        id: board.id,
        title: board.title,
        owner_id: board.owner_id,
        collaborators,
        lists,
        created_at: board.created_at,
        updated_at: board.updated_at,
    }))
}

/// PUT /api/boards/{id}
///
/// Rename a board. Owner only.
pub async fn update_board(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBoardRequest>,
) -> ApiResult<Json<BoardDto>> {
    let board = require_board_owner(&state.pool, id, user.id).await?;
    let title = clean_title(&req.title, "title")?;

    BoardRepository::update_title(&state.pool, board.id, &title).await?;
    let updated = require_board_owner(&state.pool, id, user.id).await?;
    let collaborators = BoardRepository::collaborator_ids(&state.pool, board.id).await?;

    let activity = Activity::new(
        board.id,
        Some(user.id),
        user.username.clone(),
        format!("{} renamed board to \"{}\"", user.username, title),
    );
    record_activity(&state, activity).await;

    Ok(Json(BoardDto::from_board(updated, collaborators)))
}

/// DELETE /api/boards/{id}
///
/// Cascade delete the board with everything on it. Owner only.
pub async fn delete_board(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    let board = require_board_owner(&state.pool, id, user.id).await?;

    BoardRepository::delete(&state.pool, board.id).await?;
    log::info!("User {} deleted board {}", user.username, board.id);

    Ok(Json(DeleteResponse {
        deleted: true,
        id: board.id,
    }))
}
