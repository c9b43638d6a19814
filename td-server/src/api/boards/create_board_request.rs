use serde::Deserialize;

/// Request body for creating a board
#[derive(Debug, Deserialize)]
pub struct CreateBoardRequest {
    pub title: String,
}
