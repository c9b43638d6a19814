use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Request body for creating a task
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub list_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Resolve by username and assign immediately.
    #[serde(default)]
    pub assignee_name: Option<String>,
}
