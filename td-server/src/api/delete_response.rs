use serde::Serialize;
use uuid::Uuid;

/// Response body for DELETE endpoints
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: Uuid,
}
