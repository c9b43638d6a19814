use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Drag lifecycle. Any non-`Idle` phase suppresses incoming real-time
/// events so a stale broadcast cannot visually overwrite an in-flight drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    Reconciling,
}

/// One authoritative placement write, addressed to `PUT /api/tasks/{taskId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub task_id: Uuid,
    pub list_id: Uuid,
    pub position: i32,
}

/// What came out of a drop gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Dropped outside any list.
    NoTarget,
    /// Dropped exactly where it started.
    NoOp,
    /// A text filter is active; reordering a partial view is refused with a
    /// user-visible notice.
    FilterRejected,
    /// The minimal set of placements that changed, one request per task.
    Moves(Vec<MoveRequest>),
}
