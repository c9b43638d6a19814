//! List REST API handlers
//!
//! Lists are append-only in order: a new list always lands at the tail of
//! its board, and lists are never repositioned afterwards.

use crate::api::audit::record_activity;
use crate::api::publish::publish;
use crate::api::resolve::{require_board_member, resolve_list};
use crate::api::validate::clean_title;
use crate::{ApiResult, CreateListRequest, CurrentUser, DeleteResponse, ListListResponse, ListQuery, UpdateListRequest};

use td_core::{Activity, List};
use td_db::ListRepository;
use td_ws::{AppState, DeletedId, ServerEvent};

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/lists
///
/// Create a list at the tail of the board.
pub async fn create_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateListRequest>,
) -> ApiResult<Json<List>> {
    let board = require_board_member(&state.pool, req.board_id, user.id).await?;
    let title = clean_title(&req.title, "title")?;

    let position = ListRepository::count_by_board(&state.pool, board.id).await? as i32;
    let list = List::new(title, board.id, position);
    ListRepository::create(&state.pool, &list).await?;

    log::info!("User {} created list {} on board {}", user.username, list.id, board.id);

    publish(&state, board.id, &ServerEvent::ListCreated(list.clone())).await;

    let activity = Activity::new(
        board.id,
        Some(user.id),
        user.username.clone(),
        format!("{} created list \"{}\"", user.username, list.title),
    );
    record_activity(&state, activity).await;

    Ok(Json(list))
}

/// GET /api/lists?boardId=
///
/// The board's lists in position order.
pub async fn list_lists(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListListResponse>> {
    let board = require_board_member(&state.pool, query.board_id, user.id).await?;
    let lists = ListRepository::find_by_board(&state.pool, board.id).await?;

    Ok(Json(ListListResponse { lists }))
}

/// GET /api/lists/{id}
pub async fn get_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<List>> {
    let list = resolve_list(&state.pool, id).await?;
    require_board_member(&state.pool, list.board_id, user.id).await?;

    Ok(Json(list))
}

/// PUT /api/lists/{id}
///
/// Rename a list.
pub async fn update_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateListRequest>,
) -> ApiResult<Json<List>> {
    let mut list = resolve_list(&state.pool, id).await?;
    require_board_member(&state.pool, list.board_id, user.id).await?;

    list.title = clean_title(&req.title, "title")?;
    list.updated_at = Utc::now();
    ListRepository::update(&state.pool, &list).await?;

    publish(&state, list.board_id, &ServerEvent::ListUpdated(list.clone())).await;

    Ok(Json(list))
}

/// DELETE /api/lists/{id}
///
/// Delete a list and every task on it.
pub async fn delete_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    let list = resolve_list(&state.pool, id).await?;
    require_board_member(&state.pool, list.board_id, user.id).await?;

    ListRepository::delete(&state.pool, list.id).await?;
    log::info!("User {} deleted list {} from board {}", user.username, list.id, list.board_id);

    publish(
        &state,
        list.board_id,
        &ServerEvent::ListDeleted(DeletedId { id: list.id }),
    )
    .await;

    let activity = Activity::new(
        list.board_id,
        Some(user.id),
        user.username.clone(),
        format!("{} deleted list \"{}\"", user.username, list.title),
    );
    record_activity(&state, activity).await;

    Ok(Json(DeleteResponse {
        deleted: true,
        id: list.id,
    }))
}
