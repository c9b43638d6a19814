use td_core::Board;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Board summary as the API serializes it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDto {
    pub id: Uuid,
    pub title: String,
    pub owner_id: Uuid,
    pub collaborators: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BoardDto {
    pub fn from_board(board: Board, collaborators: Vec<Uuid>) -> Self {
        Self {
            id: board.id,
            title: board.title,
            owner_id: board.owner_id,
            collaborators,
            created_at: board.created_at,
            updated_at: board.updated_at,
        }
    }
}
