use crate::BoardDto;

use serde::Serialize;

/// List of boards visible to the principal
#[derive(Debug, Serialize)]
pub struct BoardListResponse {
    pub boards: Vec<BoardDto>,
}
