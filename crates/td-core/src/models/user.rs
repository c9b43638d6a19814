use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The slice of a user record that read models expose (assignee display).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}
