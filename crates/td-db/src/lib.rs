pub mod error;
pub mod repositories;

mod row;

pub use error::{DbError, Result};
pub use repositories::activity_log_repository::ActivityLogRepository;
pub use repositories::activity_repository::{
    ActivityRepository, DEFAULT_ACTIVITY_LIMIT, MAX_ACTIVITY_LIMIT,
};
pub use repositories::board_repository::BoardRepository;
pub use repositories::list_repository::ListRepository;
pub use repositories::task_repository::TaskRepository;
pub use repositories::user_repository::UserRepository;

/// Embedded migrations, run by the server at startup and by test fixtures.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
