use crate::error::Result as DbResult;
use crate::row;

use td_core::Board;

use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

pub struct BoardRepository;

fn map_board(r: &SqliteRow) -> DbResult<Board> {
    Ok(Board {
        id: row::get_uuid(r, "id")?,
        title: r.try_get("title")?,
        owner_id: row::get_uuid(r, "owner_id")?,
        // Loaded separately; board rows never carry membership.
        collaborators: Vec::new(),
        created_at: row::get_timestamp(r, "created_at")?,
        updated_at: row::get_timestamp(r, "updated_at")?,
    })
}

impl BoardRepository {
    pub async fn create<'e, E>(executor: E, board: &Board) -> DbResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO boards (id, title, owner_id, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(board.id.to_string())
        .bind(&board.title)
        .bind(board.owner_id.to_string())
        .bind(board.created_at.timestamp())
        .bind(board.updated_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbResult<Option<Board>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query(
            r#"
                SELECT id, title, owner_id, created_at, updated_at
                FROM boards
                WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        row.map(|r| map_board(&r)).transpose()
    }

    /// Fetch a board only if `user_id` is the owner or a collaborator.
    /// `None` covers both "no such board" and "not a member" so callers
    /// can answer with a single not-found response.
    pub async fn find_accessible<'e, E>(
        executor: E,
        id: Uuid,
        user_id: Uuid,
    ) -> DbResult<Option<Board>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query(
            r#"
                SELECT b.id, b.title, b.owner_id, b.created_at, b.updated_at
                FROM boards b
                WHERE b.id = ?
                  AND (b.owner_id = ?
                       OR EXISTS (SELECT 1 FROM board_collaborators c
                                  WHERE c.board_id = b.id AND c.user_id = ?))
            "#,
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(executor)
        .await?;

        row.map(|r| map_board(&r)).transpose()
    }

    /// All boards the user owns or collaborates on, newest first.
    pub async fn find_for_user<'e, E>(executor: E, user_id: Uuid) -> DbResult<Vec<Board>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query(
            r#"
                SELECT b.id, b.title, b.owner_id, b.created_at, b.updated_at
                FROM boards b
                WHERE b.owner_id = ?
                   OR EXISTS (SELECT 1 FROM board_collaborators c
                              WHERE c.board_id = b.id AND c.user_id = ?)
                ORDER BY b.created_at DESC
            "#,
        )
        .bind(user_id.to_string())
        .bind(user_id.to_string())
        .fetch_all(executor)
        .await?;

        rows.iter().map(map_board).collect()
    }

    pub async fn collaborator_ids<'e, E>(executor: E, board_id: Uuid) -> DbResult<Vec<Uuid>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query(
            r#"
                SELECT user_id
                FROM board_collaborators
                WHERE board_id = ?
            "#,
        )
        .bind(board_id.to_string())
        .fetch_all(executor)
        .await?;

        rows.iter().map(|r| row::get_uuid(r, "user_id")).collect()
    }

    pub async fn add_collaborator<'e, E>(executor: E, board_id: Uuid, user_id: Uuid) -> DbResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT OR IGNORE INTO board_collaborators (board_id, user_id)
                VALUES (?, ?)
            "#,
        )
        .bind(board_id.to_string())
        .bind(user_id.to_string())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn update_title<'e, E>(executor: E, id: Uuid, title: &str) -> DbResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                UPDATE boards
                SET title = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(title)
        .bind(chrono::Utc::now().timestamp())
        .bind(id.to_string())
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Removes the board and everything hanging off it in one transaction.
    pub async fn delete(pool: &sqlx::SqlitePool, id: Uuid) -> DbResult<()> {
        let id_str = id.to_string();
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM task_assignees WHERE task_id IN (SELECT id FROM tasks WHERE board_id = ?)")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM tasks WHERE board_id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM lists WHERE board_id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM activities WHERE board_id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM activity_logs WHERE board_id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM board_collaborators WHERE board_id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM boards WHERE id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
