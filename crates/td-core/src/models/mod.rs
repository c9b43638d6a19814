pub mod activity;
pub mod activity_log;
pub mod board;
pub mod list;
pub mod priority;
pub mod task;
pub mod task_view;
pub mod user;
