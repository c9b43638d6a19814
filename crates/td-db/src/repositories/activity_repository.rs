use crate::error::Result as DbResult;
use crate::row;

use td_core::Activity;

use sqlx::Row;
use uuid::Uuid;

/// History reads are capped to keep the payload bounded; the cap itself is
/// clamped so callers cannot request an unbounded page.
pub const DEFAULT_ACTIVITY_LIMIT: i64 = 20;
pub const MAX_ACTIVITY_LIMIT: i64 = 50;

pub struct ActivityRepository;

impl ActivityRepository {
    pub async fn create<'e, E>(executor: E, activity: &Activity) -> DbResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO activities (id, board_id, user_id, username, action, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(activity.id.to_string())
        .bind(activity.board_id.to_string())
        .bind(activity.user_id.map(|id| id.to_string()))
        .bind(&activity.username)
        .bind(&activity.action)
        .bind(activity.created_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Most recent entries first. `limit` is clamped to
    /// `DEFAULT_ACTIVITY_LIMIT..=MAX_ACTIVITY_LIMIT`.
    pub async fn find_recent_by_board<'e, E>(
        executor: E,
        board_id: Uuid,
        limit: i64,
    ) -> DbResult<Vec<Activity>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let limit = limit.clamp(DEFAULT_ACTIVITY_LIMIT, MAX_ACTIVITY_LIMIT);

        let rows = sqlx::query(
            r#"
                SELECT id, board_id, user_id, username, action, created_at
                FROM activities
                WHERE board_id = ?
                ORDER BY created_at DESC, id DESC
                LIMIT ?
            "#,
        )
        .bind(board_id.to_string())
        .bind(limit)
        .fetch_all(executor)
        .await?;

        rows.iter()
            .map(|r| {
                Ok(Activity {
                    id: row::get_uuid(r, "id")?,
                    board_id: row::get_uuid(r, "board_id")?,
                    user_id: row::get_opt_uuid(r, "user_id")?,
                    username: r.try_get("username")?,
                    action: r.try_get("action")?,
                    created_at: row::get_timestamp(r, "created_at")?,
                })
            })
            .collect()
    }
}
