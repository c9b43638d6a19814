use crate::{MoveRequest, Result};

use td_core::Task;

use async_trait::async_trait;
use uuid::Uuid;

/// The slice of the REST surface the projector needs. Abstracted so the
/// reconcile path can be driven by a fake in tests.
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// One authoritative placement write; returns the task as the server
    /// now sees it.
    async fn move_task(&self, request: &MoveRequest) -> Result<Task>;

    /// Full board task fetch, the sole recovery path after a failed
    /// reconcile.
    async fn fetch_board_tasks(&self, board_id: Uuid) -> Result<Vec<Task>>;
}
