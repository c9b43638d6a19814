use serde::Deserialize;

/// Request body for renaming a list
#[derive(Debug, Deserialize)]
pub struct UpdateListRequest {
    pub title: String,
}
