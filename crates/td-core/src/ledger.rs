//! Position ledger: restores the density invariant for one or two lists
//! after any membership or order change.
//!
//! Positions are recomputed for an entire list whenever it is touched,
//! never patched incrementally. That keeps the invariant trivially
//! checkable: at rest, the tasks of a list sorted by position always
//! occupy exactly `0..n-1`.

use crate::error::{CoreError, Result};
use crate::models::task::Task;

use std::collections::HashMap;
use std::panic::Location;

use error_location::ErrorLocation;
use uuid::Uuid;

/// Outcome of planning a move. Only tasks whose `(list_id, position)`
/// actually changed are reported, so callers can bound their writes.
#[derive(Debug, Clone)]
pub struct MovePlan {
    /// Final state of the moved task.
    pub subject: Task,
    /// Other tasks whose placement changed, in their final state.
    pub others: Vec<Task>,
    /// Whether the task changed lists (a move) or stayed put (a reorder).
    pub moved_lists: bool,
    /// Nothing changed: same list, same resulting index, density already
    /// held. No writes and no broadcast should follow.
    pub no_op: bool,
}

/// Assign position `i` to the task at index `i`. Returns the ids of tasks
/// whose position actually changed.
pub fn reindex(tasks: &mut [Task]) -> Vec<Uuid> {
    let mut changed = Vec::new();
    for (i, task) in tasks.iter_mut().enumerate() {
        let position = i as i32;
        if task.position != position {
            task.position = position;
            changed.push(task.id);
        }
    }
    changed
}

/// Plan moving `task_id` out of `source` (the source list's tasks in their
/// current order) to `dest_index`. `dest` is `Some` for a cross-list move
/// and carries the destination list's current order; `None` reorders within
/// the source list.
///
/// The task is removed from its old index before the insertion point is
/// resolved, so `dest_index` refers to the post-removal array. An index past
/// the tail clamps to an append.
pub fn plan_move(
    source_list_id: Uuid,
    mut source: Vec<Task>,
    dest: Option<(Uuid, Vec<Task>)>,
    task_id: Uuid,
    dest_index: usize,
) -> Result<MovePlan> {
    let mut before: HashMap<Uuid, (Uuid, i32)> = source
        .iter()
        .map(|t| (t.id, (t.list_id, t.position)))
        .collect();
    if let Some((_, dest_tasks)) = &dest {
        before.extend(dest_tasks.iter().map(|t| (t.id, (t.list_id, t.position))));
    }

    let index = source
        .iter()
        .position(|t| t.id == task_id)
        .ok_or_else(|| CoreError::TaskNotInList {
            task_id,
            list_id: source_list_id,
            location: ErrorLocation::from(Location::caller()),
        })?;
    let mut subject = source.remove(index);

    let moved_lists = dest.is_some();
    let (mut dest_tasks, mut source_rest) = match dest {
        Some((dest_list_id, dest_tasks)) => {
            subject.list_id = dest_list_id;
            (dest_tasks, Some(source))
        }
        None => (source, None),
    };

    let insert_at = dest_index.min(dest_tasks.len());
    dest_tasks.insert(insert_at, subject);

    reindex(&mut dest_tasks);
    if let Some(rest) = &mut source_rest {
        reindex(rest);
    }

    let mut subject = None;
    let mut others = Vec::new();
    let all = dest_tasks.into_iter().chain(source_rest.into_iter().flatten());
    for task in all {
        let placement_changed = before.get(&task.id) != Some(&(task.list_id, task.position));
        if task.id == task_id {
            subject = Some((task, placement_changed));
        } else if placement_changed {
            others.push(task);
        }
    }

    // The subject was found above; the remove() would have failed otherwise.
    let (subject, subject_changed) = subject.ok_or_else(|| CoreError::TaskNotInList {
        task_id,
        list_id: source_list_id,
        location: ErrorLocation::from(Location::caller()),
    })?;

    let no_op = !subject_changed && others.is_empty();

    Ok(MovePlan {
        subject,
        others,
        moved_lists,
        no_op,
    })
}
