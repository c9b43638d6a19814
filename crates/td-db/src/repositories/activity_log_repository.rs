use crate::error::Result as DbResult;
use crate::row;

use td_core::ActivityLog;

use sqlx::Row;
use uuid::Uuid;

pub struct ActivityLogRepository;

impl ActivityLogRepository {
    pub async fn create<'e, E>(executor: E, log: &ActivityLog) -> DbResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO activity_logs (
                    id, user_id, board_id, list_id, task_id, action, details, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(log.id.to_string())
        .bind(log.user_id.to_string())
        .bind(log.board_id.to_string())
        .bind(log.list_id.map(|id| id.to_string()))
        .bind(log.task_id.map(|id| id.to_string()))
        .bind(&log.action)
        .bind(&log.details)
        .bind(log.created_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_board<'e, E>(executor: E, board_id: Uuid) -> DbResult<Vec<ActivityLog>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query(
            r#"
                SELECT id, user_id, board_id, list_id, task_id, action, details, created_at
                FROM activity_logs
                WHERE board_id = ?
                ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(board_id.to_string())
        .fetch_all(executor)
        .await?;

        rows.iter()
            .map(|r| {
                Ok(ActivityLog {
                    id: row::get_uuid(r, "id")?,
                    user_id: row::get_uuid(r, "user_id")?,
                    board_id: row::get_uuid(r, "board_id")?,
                    list_id: row::get_opt_uuid(r, "list_id")?,
                    task_id: row::get_opt_uuid(r, "task_id")?,
                    action: r.try_get("action")?,
                    details: r.try_get("details")?,
                    created_at: row::get_timestamp(r, "created_at")?,
                })
            })
            .collect()
    }
}
