use serde::Deserialize;
use uuid::Uuid;

/// Query parameters for GET /api/activity
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityQuery {
    pub board_id: Uuid,
    #[serde(default)]
    pub limit: Option<i64>,
}
