pub mod error;
pub mod ledger;
pub mod models;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use ledger::{MovePlan, plan_move, reindex};
pub use models::activity::Activity;
pub use models::activity_log::ActivityLog;
pub use models::board::Board;
pub use models::list::List;
pub use models::priority::Priority;
pub use models::task::Task;
pub use models::task_view::TaskView;
pub use models::user::UserSummary;

#[cfg(test)]
mod tests;
