use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid priority: {value} {location}")]
    InvalidPriority {
        value: String,
        location: ErrorLocation,
    },

    #[error("Task {task_id} is not in list {list_id} {location}")]
    TaskNotInList {
        task_id: uuid::Uuid,
        list_id: uuid::Uuid,
        location: ErrorLocation,
    },

    #[error("UUID parse error: {source} {location}")]
    Uuid {
        source: uuid::Error,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
