//! Wire shapes for the per-board real-time channel. Every frame is a JSON
//! object `{"event": ..., "data": ...}` in both directions.

use crate::{BroadcastMessage, Result as WsResult};

use td_core::{Activity, List, TaskView};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events the server pushes to every subscriber of a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    TaskCreated(TaskView),
    TaskUpdated(TaskView),
    /// Carries the task's post-move state; displaced neighbors are implied
    /// and clients reindex locally.
    TaskMoved(TaskView),
    TaskDeleted(DeletedId),
    ListCreated(List),
    ListUpdated(List),
    ListDeleted(DeletedId),
    ActivityLog(Activity),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedId {
    pub id: Uuid,
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TaskCreated(_) => "taskCreated",
            Self::TaskUpdated(_) => "taskUpdated",
            Self::TaskMoved(_) => "taskMoved",
            Self::TaskDeleted(_) => "taskDeleted",
            Self::ListCreated(_) => "listCreated",
            Self::ListUpdated(_) => "listUpdated",
            Self::ListDeleted(_) => "listDeleted",
            Self::ActivityLog(_) => "activityLog",
        }
    }

    pub fn to_broadcast(&self) -> WsResult<BroadcastMessage> {
        let payload = serde_json::to_vec(self)?;
        Ok(BroadcastMessage::new(
            bytes::Bytes::from(payload),
            self.name().to_string(),
        ))
    }
}

/// Messages clients send over the socket: board room membership only.
/// All mutations go through the REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    JoinBoard { board_id: Uuid },
    #[serde(rename_all = "camelCase")]
    LeaveBoard { board_id: Uuid },
}
