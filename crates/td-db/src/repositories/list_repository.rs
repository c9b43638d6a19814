use crate::error::Result as DbResult;
use crate::row;

use td_core::List;

use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

pub struct ListRepository;

fn map_list(r: &SqliteRow) -> DbResult<List> {
    Ok(List {
        id: row::get_uuid(r, "id")?,
        board_id: row::get_uuid(r, "board_id")?,
        title: r.try_get("title")?,
        position: r.try_get::<i64, _>("position")? as i32,
        created_at: row::get_timestamp(r, "created_at")?,
        updated_at: row::get_timestamp(r, "updated_at")?,
    })
}

impl ListRepository {
    pub async fn create<'e, E>(executor: E, list: &List) -> DbResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO lists (id, board_id, title, position, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(list.id.to_string())
        .bind(list.board_id.to_string())
        .bind(&list.title)
        .bind(list.position)
        .bind(list.created_at.timestamp())
        .bind(list.updated_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbResult<Option<List>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query(
            r#"
                SELECT id, board_id, title, position, created_at, updated_at
                FROM lists
                WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        row.map(|r| map_list(&r)).transpose()
    }

    pub async fn find_by_board<'e, E>(executor: E, board_id: Uuid) -> DbResult<Vec<List>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query(
            r#"
                SELECT id, board_id, title, position, created_at, updated_at
                FROM lists
                WHERE board_id = ?
                ORDER BY position
            "#,
        )
        .bind(board_id.to_string())
        .fetch_all(executor)
        .await?;

        rows.iter().map(map_list).collect()
    }

    pub async fn count_by_board<'e, E>(executor: E, board_id: Uuid) -> DbResult<i64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lists WHERE board_id = ?")
            .bind(board_id.to_string())
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    pub async fn update<'e, E>(executor: E, list: &List) -> DbResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                UPDATE lists
                SET title = ?, position = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(&list.title)
        .bind(list.position)
        .bind(list.updated_at.timestamp())
        .bind(list.id.to_string())
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Removes the list, its tasks and their assignee links in one transaction.
    pub async fn delete(pool: &sqlx::SqlitePool, id: Uuid) -> DbResult<()> {
        let id_str = id.to_string();
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM task_assignees WHERE task_id IN (SELECT id FROM tasks WHERE list_id = ?)")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM tasks WHERE list_id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM lists WHERE id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
