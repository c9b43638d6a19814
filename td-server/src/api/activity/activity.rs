//! Activity feed REST API handler

use crate::api::resolve::require_board_member;
use crate::{ActivityListResponse, ActivityQuery, ApiResult, CurrentUser};

use td_db::{ActivityRepository, DEFAULT_ACTIVITY_LIMIT};
use td_ws::AppState;

use axum::{
    Json,
    extract::{Query, State},
};

/// GET /api/activity?boardId=&limit=
///
/// Recent board history, newest first. The limit is clamped by the
/// repository so the feed payload stays bounded.
pub async fn list_activity(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ActivityQuery>,
) -> ApiResult<Json<ActivityListResponse>> {
    let board = require_board_member(&state.pool, query.board_id, user.id).await?;

    let limit = query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
    let activities = ActivityRepository::find_recent_by_board(&state.pool, board.id, limit).await?;

    Ok(Json(ActivityListResponse { activities }))
}
