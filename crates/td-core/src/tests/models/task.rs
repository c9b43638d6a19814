use crate::{Priority, Task, TaskView, UserSummary};

use uuid::Uuid;

#[test]
fn test_task_new_appends_with_defaults() {
    let list_id = Uuid::new_v4();
    let board_id = Uuid::new_v4();
    let task = Task::new("Write docs".to_string(), None, list_id, board_id, 3);

    assert_eq!(task.list_id, list_id);
    assert_eq!(task.board_id, board_id);
    assert_eq!(task.position, 3);
    assert_eq!(task.priority, Priority::Low);
    assert!(task.deadline.is_none());
    assert!(task.assignees.is_empty());
}

#[test]
fn test_task_view_serializes_camel_case() {
    let task = Task::new("Ship it".to_string(), None, Uuid::new_v4(), Uuid::new_v4(), 0);
    let assignee = UserSummary {
        id: Uuid::new_v4(),
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
    };

    let view = TaskView::from_task(task.clone(), vec![assignee]);
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["listId"], task.list_id.to_string());
    assert_eq!(json["boardId"], task.board_id.to_string());
    assert_eq!(json["priority"], "Low");
    assert_eq!(json["assignees"][0]["username"], "alice");
}
