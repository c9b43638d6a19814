use td_core::Task;

use uuid::Uuid;

mod projector;

pub(crate) fn make_task(list_id: Uuid, board_id: Uuid, title: &str, position: i32) -> Task {
    Task::new(title.to_string(), None, list_id, board_id, position)
}
