use crate::models::priority::Priority;
use crate::models::task::Task;
use crate::models::user::UserSummary;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task read model for JSON serialization: the task plus its assignees
/// denormalized to displayable user records. This is the shape both the REST
/// responses and the real-time events carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: Uuid,
    pub list_id: Uuid,
    pub board_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub deadline: Option<DateTime<Utc>>,
    pub position: i32,
    pub assignees: Vec<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskView {
    pub fn from_task(task: Task, assignees: Vec<UserSummary>) -> Self {
        Self {
            id: task.id,
            list_id: task.list_id,
            board_id: task.board_id,
            title: task.title,
            description: task.description,
            priority: task.priority.as_str().to_string(),
            deadline: task.deadline,
            position: task.position,
            assignees,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }

    /// Back-conversion for consumers that keep `Task` records locally;
    /// assignees collapse to their ids.
    pub fn into_task(self) -> crate::Result<Task> {
        Ok(Task {
            id: self.id,
            list_id: self.list_id,
            board_id: self.board_id,
            title: self.title,
            description: self.description,
            priority: Priority::from_str(&self.priority)?,
            deadline: self.deadline,
            position: self.position,
            assignees: self.assignees.into_iter().map(|u| u.id).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
