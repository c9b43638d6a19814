use std::collections::HashMap;

use td_core::Task;
use uuid::Uuid;

/// Client-side render model of one board: ordered task arrays keyed by list.
/// Positions inside each array are kept dense, mirroring what the server's
/// recompute would produce.
#[derive(Debug, Clone)]
pub struct BoardProjection {
    board_id: Uuid,
    list_order: Vec<Uuid>,
    tasks: HashMap<Uuid, Vec<Task>>,
}

impl BoardProjection {
    /// Build from a full fetch. Tasks are grouped per list and ordered by
    /// their server-assigned positions; lists without tasks stay present.
    pub fn from_parts(board_id: Uuid, list_ids: Vec<Uuid>, tasks: Vec<Task>) -> Self {
        let mut grouped: HashMap<Uuid, Vec<Task>> = HashMap::new();
        let mut list_order = list_ids;

        for list_id in &list_order {
            grouped.entry(*list_id).or_default();
        }

        for task in tasks {
            if !grouped.contains_key(&task.list_id) {
                list_order.push(task.list_id);
            }
            grouped.entry(task.list_id).or_default().push(task);
        }

        for list in grouped.values_mut() {
            list.sort_by_key(|t| t.position);
        }

        Self {
            board_id,
            list_order,
            tasks: grouped,
        }
    }

    pub fn board_id(&self) -> Uuid {
        self.board_id
    }

    pub fn list_order(&self) -> &[Uuid] {
        &self.list_order
    }

    pub fn tasks_in(&self, list_id: Uuid) -> &[Task] {
        self.tasks.get(&list_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn task_count(&self) -> usize {
        self.tasks.values().map(Vec::len).sum()
    }

    /// Snapshot of every task's `(list_id, position)` placement, the
    /// before-image a drop gesture diffs against.
    pub fn placements(&self) -> HashMap<Uuid, (Uuid, i32)> {
        let mut out = HashMap::new();
        for (list_id, tasks) in &self.tasks {
            for task in tasks {
                out.insert(task.id, (*list_id, task.position));
            }
        }
        out
    }

    pub fn contains_list(&self, list_id: Uuid) -> bool {
        self.tasks.contains_key(&list_id)
    }

    pub fn add_list(&mut self, list_id: Uuid) {
        if !self.tasks.contains_key(&list_id) {
            self.list_order.push(list_id);
            self.tasks.insert(list_id, Vec::new());
        }
    }

    pub fn remove_list(&mut self, list_id: Uuid) {
        self.list_order.retain(|id| *id != list_id);
        self.tasks.remove(&list_id);
    }

    /// Idempotent merge of a server-truth task record: the task lands in its
    /// list ordered by server position. Applying the same record twice, or a
    /// record matching local state, changes nothing.
    pub fn upsert_task(&mut self, task: Task) {
        self.detach(task.id);
        self.add_list(task.list_id);
        let list = self.tasks.entry(task.list_id).or_default();
        let index = list
            .iter()
            .position(|t| t.position >= task.position)
            .unwrap_or(list.len());
        list.insert(index, task);
    }

    /// Remove a task and close the gap in its list.
    pub fn remove_task(&mut self, task_id: Uuid) -> Option<Task> {
        let removed = self.detach(task_id)?;
        if let Some(list) = self.tasks.get_mut(&removed.list_id) {
            td_core::reindex(list);
        }
        Some(removed)
    }

    /// Apply a drop gesture: remove at `(source_list, source_index)`, insert
    /// into `dest_list` at `dest_index` (post-removal semantics, clamped to
    /// the tail), then renumber both lists densely. Returns `None` when the
    /// source slot does not exist.
    pub fn apply_drop(
        &mut self,
        source_list: Uuid,
        source_index: usize,
        dest_list: Uuid,
        dest_index: usize,
    ) -> Option<Uuid> {
        let source = self.tasks.get_mut(&source_list)?;
        if source_index >= source.len() {
            return None;
        }
        let mut subject = source.remove(source_index);
        let moved_id = subject.id;
        td_core::reindex(source);

        subject.list_id = dest_list;
        self.add_list(dest_list);
        let dest = self.tasks.entry(dest_list).or_default();
        let index = dest_index.min(dest.len());
        dest.insert(index, subject);
        td_core::reindex(dest);

        Some(moved_id)
    }

    fn detach(&mut self, task_id: Uuid) -> Option<Task> {
        for tasks in self.tasks.values_mut() {
            if let Some(index) = tasks.iter().position(|t| t.id == task_id) {
                return Some(tasks.remove(index));
            }
        }
        None
    }
}
