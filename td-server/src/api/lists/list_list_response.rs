use td_core::List;

use serde::Serialize;

/// Ordered lists of one board
#[derive(Debug, Serialize)]
pub struct ListListResponse {
    pub lists: Vec<List>,
}
