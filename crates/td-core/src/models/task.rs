use crate::models::priority::Priority;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,

    // Ownership: a task belongs to exactly one list at any instant.
    pub list_id: Uuid,
    // Denormalized for fast board-wide filtering; always equals the
    // board of the owning list.
    pub board_id: Uuid,

    pub title: String,
    pub description: Option<String>,

    pub priority: Priority,
    pub deadline: Option<DateTime<Utc>>,

    /// Zero-based dense rank within the owning list.
    pub position: i32,

    pub assignees: Vec<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(
        title: String,
        description: Option<String>,
        list_id: Uuid,
        board_id: Uuid,
        position: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            list_id,
            board_id,
            title,
            description,
            priority: Priority::Low,
            deadline: None,
            position,
            assignees: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
