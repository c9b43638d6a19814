use td_core::{List, TaskView};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Full board payload: the board, its lists in position order, and each
/// list's tasks in position order with denormalized assignees. One fetch
/// of this response is the client's complete picture of a board.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub owner_id: Uuid,
    pub collaborators: Vec<Uuid>,
    pub lists: Vec<ListDetailDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDetailDto {
    pub id: Uuid,
    pub board_id: Uuid,
    pub title: String,
    pub position: i32,
    pub tasks: Vec<TaskView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListDetailDto {
    pub fn from_list(list: List, tasks: Vec<TaskView>) -> Self {
        Self {
            id: list.id,
            board_id: list.board_id,
            title: list.title,
            position: list.position,
            tasks,
            created_at: list.created_at,
            updated_at: list.updated_at,
        }
    }
}
