use serde::Deserialize;

/// Request body for renaming a board (owner only)
#[derive(Debug, Deserialize)]
pub struct UpdateBoardRequest {
    pub title: String,
}
