use serde::Deserialize;
use uuid::Uuid;

/// Request body for creating a list
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    pub board_id: Uuid,
    pub title: String,
}
