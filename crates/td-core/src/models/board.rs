use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub title: String,

    /// Owning user; the only principal allowed to rename or delete the board.
    pub owner_id: Uuid,

    /// Users who can also see and collaborate on this board.
    pub collaborators: Vec<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    pub fn new(title: String, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            owner_id,
            collaborators: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Read/write access: owner or collaborator.
    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id || self.collaborators.contains(&user_id)
    }
}
