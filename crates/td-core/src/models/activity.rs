use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Human-readable board history entry ("alice moved task \"Bug Fix\"").
/// Append-only side channel; reads are capped to the most recent entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub board_id: Uuid,

    pub user_id: Option<Uuid>,
    /// Cached username for display; avoids a user lookup per row.
    pub username: String,

    pub action: String,

    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(board_id: Uuid, user_id: Option<Uuid>, username: String, action: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            board_id,
            user_id,
            username,
            action,
            created_at: Utc::now(),
        }
    }
}
