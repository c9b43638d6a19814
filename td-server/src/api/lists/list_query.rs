use serde::Deserialize;
use uuid::Uuid;

/// Query parameters for GET /api/lists
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub board_id: Uuid,
}
