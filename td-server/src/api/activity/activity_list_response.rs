use td_core::Activity;

use serde::Serialize;

/// Recent history of one board, newest first
#[derive(Debug, Serialize)]
pub struct ActivityListResponse {
    pub activities: Vec<Activity>,
}
