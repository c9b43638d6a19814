use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TASK_CREATED: &str = "TASK_CREATED";
pub const TASK_MOVED: &str = "TASK_MOVED";
pub const TASK_UPDATED: &str = "TASK_UPDATED";
pub const TASK_DELETED: &str = "TASK_DELETED";

/// Structured audit record. Best-effort: writing one must never abort the
/// operation it describes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: Uuid,

    pub user_id: Uuid,
    pub board_id: Uuid,
    pub list_id: Option<Uuid>,
    pub task_id: Option<Uuid>,

    pub action: String,
    pub details: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl ActivityLog {
    pub fn new(
        user_id: Uuid,
        board_id: Uuid,
        list_id: Option<Uuid>,
        task_id: Option<Uuid>,
        action: &str,
        details: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            board_id,
            list_id,
            task_id,
            action: action.to_string(),
            details,
            created_at: Utc::now(),
        }
    }

    pub fn task_created(user_id: Uuid, board_id: Uuid, list_id: Uuid, task_id: Uuid, title: &str) -> Self {
        Self::new(
            user_id,
            board_id,
            Some(list_id),
            Some(task_id),
            TASK_CREATED,
            Some(format!("Task created: {}", title)),
        )
    }

    pub fn task_moved(
        user_id: Uuid,
        board_id: Uuid,
        from_list: Uuid,
        to_list: Uuid,
        task_id: Uuid,
    ) -> Self {
        Self::new(
            user_id,
            board_id,
            Some(to_list),
            Some(task_id),
            TASK_MOVED,
            Some(format!("Task moved from list {} to {}", from_list, to_list)),
        )
    }

    pub fn task_updated(user_id: Uuid, board_id: Uuid, list_id: Uuid, task_id: Uuid, title: &str) -> Self {
        Self::new(
            user_id,
            board_id,
            Some(list_id),
            Some(task_id),
            TASK_UPDATED,
            Some(format!("Task updated: {}", title)),
        )
    }

    pub fn task_deleted(user_id: Uuid, board_id: Uuid, list_id: Uuid, task_id: Uuid, title: &str) -> Self {
        Self::new(
            user_id,
            board_id,
            Some(list_id),
            Some(task_id),
            TASK_DELETED,
            Some(format!("Task deleted: {}", title)),
        )
    }
}
