use td_core::TaskView;

use serde::Serialize;

/// Paged search results
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSearchResponse {
    pub tasks: Vec<TaskView>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}
