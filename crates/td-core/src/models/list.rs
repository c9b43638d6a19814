use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: Uuid,
    pub board_id: Uuid,

    pub title: String,

    /// Order among the lists of a board. Lists are appended, never reordered,
    /// so this is assigned once at creation time.
    pub position: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl List {
    pub fn new(title: String, board_id: Uuid, position: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            board_id,
            title,
            position,
            created_at: now,
            updated_at: now,
        }
    }
}
