use crate::{BoardApi, BoardProjection, DragPhase, DropOutcome, MoveRequest, Result};

use td_ws::ServerEvent;

use std::collections::VecDeque;

use futures::future::join_all;
use uuid::Uuid;

/// How a reconcile round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Every move request succeeded; the optimistic render was already
    /// correct and nothing was fetched.
    Confirmed,
    /// At least one request failed; the prediction was discarded and the
    /// whole board was refetched.
    Refetched,
}

/// Drives drag-and-drop against a `BoardProjection`: renders the predicted
/// order immediately, reconciles with the server afterwards, and keeps
/// real-time events from clobbering an in-flight drag.
pub struct BoardProjector {
    projection: BoardProjection,
    phase: DragPhase,
    filter: Option<String>,
    /// Events received while a drag is in flight, replayed on settle.
    buffered: VecDeque<ServerEvent>,
}

impl BoardProjector {
    pub fn new(projection: BoardProjection) -> Self {
        Self {
            projection,
            phase: DragPhase::Idle,
            filter: None,
            buffered: VecDeque::new(),
        }
    }

    pub fn projection(&self) -> &BoardProjection {
        &self.projection
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Enables the reorder-while-filtered guard. Whitespace-only filters
    /// count as no filter.
    pub fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter.filter(|f| !f.trim().is_empty());
    }

    /// Drag started. Incoming events are buffered from here until the drag
    /// settles.
    pub fn begin_drag(&mut self) {
        if self.phase == DragPhase::Idle {
            self.phase = DragPhase::Dragging;
        }
    }

    /// Drop gesture. Computes the predicted per-list orders, renders them
    /// into the projection, and returns the minimal changed placement set.
    pub fn drop_task(
        &mut self,
        source_list: Uuid,
        source_index: usize,
        target: Option<(Uuid, usize)>,
    ) -> DropOutcome {
        if self.phase != DragPhase::Dragging {
            return DropOutcome::NoTarget;
        }

        if self.filter.is_some() {
            // Predicted order under a partial view would not match true
            // positions.
            self.settle();
            return DropOutcome::FilterRejected;
        }

        let Some((dest_list, dest_index)) = target else {
            self.settle();
            return DropOutcome::NoTarget;
        };

        if dest_list == source_list && dest_index == source_index {
            self.settle();
            return DropOutcome::NoOp;
        }

        let before = self.projection.placements();
        let Some(moved_id) =
            self.projection
                .apply_drop(source_list, source_index, dest_list, dest_index)
        else {
            self.settle();
            return DropOutcome::NoTarget;
        };

        // Diff against the previous render: only placements that actually
        // changed become requests.
        let after = self.projection.placements();
        let mut moves: Vec<MoveRequest> = Vec::new();
        for (task_id, (list_id, position)) in &after {
            if before.get(task_id) != Some(&(*list_id, *position)) {
                moves.push(MoveRequest {
                    task_id: *task_id,
                    list_id: *list_id,
                    position: *position,
                });
            }
        }

        if moves.is_empty() {
            self.settle();
            return DropOutcome::NoOp;
        }

        // Subject first, displaced neighbors after, in render order.
        moves.sort_by_key(|m| (m.task_id != moved_id, m.list_id, m.position));

        self.phase = DragPhase::Reconciling;
        DropOutcome::Moves(moves)
    }

    /// Issues every move request in parallel. All-success keeps the local
    /// prediction; any failure discards it and refetches the whole board,
    /// the sole recovery path.
    pub async fn reconcile<A>(&mut self, api: &A, moves: &[MoveRequest]) -> Result<ReconcileOutcome>
    where
        A: BoardApi + ?Sized,
    {
        let results = join_all(moves.iter().map(|m| api.move_task(m))).await;

        if results.iter().all(|r| r.is_ok()) {
            // Local state already matches the server; our own echoes merge
            // as no-ops.
            self.settle();
            return Ok(ReconcileOutcome::Confirmed);
        }

        log::warn!(
            "{} of {} move requests failed; discarding optimistic state",
            results.iter().filter(|r| r.is_err()).count(),
            results.len()
        );

        let refetch = api.fetch_board_tasks(self.projection.board_id()).await;
        // The optimistic prediction is invalid either way.
        self.buffered.clear();
        self.phase = DragPhase::Idle;

        let tasks = refetch?;
        let list_ids = self.projection.list_order().to_vec();
        self.projection = BoardProjection::from_parts(self.projection.board_id(), list_ids, tasks);
        Ok(ReconcileOutcome::Refetched)
    }

    /// Merge path for events from other clients. Suppressed (buffered)
    /// while a drag is in flight.
    pub fn apply_event(&mut self, event: ServerEvent) {
        if self.phase != DragPhase::Idle {
            self.buffered.push_back(event);
            return;
        }
        self.merge(event);
    }

    /// Back to `Idle`, replaying whatever arrived mid-drag.
    fn settle(&mut self) {
        self.phase = DragPhase::Idle;
        while let Some(event) = self.buffered.pop_front() {
            self.merge(event);
        }
    }

    fn merge(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::TaskCreated(view)
            | ServerEvent::TaskUpdated(view)
            | ServerEvent::TaskMoved(view) => match view.into_task() {
                Ok(task) => {
                    if task.board_id == self.projection.board_id() {
                        self.projection.upsert_task(task);
                    }
                }
                Err(e) => log::warn!("Dropping malformed task event: {}", e),
            },
            ServerEvent::TaskDeleted(deleted) => {
                self.projection.remove_task(deleted.id);
            }
            ServerEvent::ListCreated(list) | ServerEvent::ListUpdated(list) => {
                if list.board_id == self.projection.board_id() {
                    self.projection.add_list(list.id);
                }
            }
            ServerEvent::ListDeleted(deleted) => {
                self.projection.remove_list(deleted.id);
            }
            // History entries carry no board state.
            ServerEvent::ActivityLog(_) => {}
        }
    }
}
