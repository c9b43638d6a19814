pub mod create_task_request;
pub mod search_tasks_query;
pub mod task_search_response;
#[allow(clippy::module_inception)]
pub mod tasks;
pub mod update_task_request;
