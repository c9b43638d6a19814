use serde::Deserialize;
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for `GET /api/tasks`. One of `board_id` or `list_id`
/// is required; `list_id` wins when both are present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTasksQuery {
    #[serde(default)]
    pub board_id: Option<Uuid>,
    #[serde(default)]
    pub list_id: Option<Uuid>,
    /// Substring matched against title and description.
    #[serde(default)]
    pub q: Option<String>,
    /// One-based page number.
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}
