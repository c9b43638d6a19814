use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Request body for `PUT /api/tasks/{id}`.
///
/// Placement (`list_id`, `position`) and field edits share one endpoint;
/// any field left out stays untouched. `description` and `deadline` use a
/// double `Option` so an explicit `null` clears the value while an absent
/// key leaves it alone.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub list_id: Option<Uuid>,
    /// Post-removal index in the target list; past-the-end clamps to append.
    #[serde(default)]
    pub position: Option<i32>,

    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "some_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "some_option")]
    pub deadline: Option<Option<DateTime<Utc>>>,

    /// Full replacement of the assignee set.
    #[serde(default)]
    pub assignees: Option<Vec<Uuid>>,
    /// Resolve by username, add as assignee and board collaborator.
    #[serde(default)]
    pub assignee_name: Option<String>,
}

/// Distinguish an absent key (outer `None`) from an explicit `null`
/// (outer `Some(None)`).
fn some_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
