use crate::error::{DbError, Result as DbResult};
use crate::row;

use td_core::{Priority, Task};

use std::str::FromStr;

use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

const TASK_COLUMNS: &str =
    "id, list_id, board_id, title, description, priority, deadline, position, created_at, updated_at";

pub struct TaskRepository;

fn map_task(r: &SqliteRow) -> DbResult<Task> {
    let priority_raw: String = r.try_get("priority")?;
    Ok(Task {
        id: row::get_uuid(r, "id")?,
        list_id: row::get_uuid(r, "list_id")?,
        board_id: row::get_uuid(r, "board_id")?,
        title: r.try_get("title")?,
        description: r.try_get("description")?,
        priority: Priority::from_str(&priority_raw)
            .map_err(|e| DbError::decode(format!("Invalid priority in tasks.priority: {}", e)))?,
        deadline: row::get_opt_timestamp(r, "deadline")?,
        position: r.try_get::<i64, _>("position")? as i32,
        // Loaded separately; task rows never carry assignees.
        assignees: Vec::new(),
        created_at: row::get_timestamp(r, "created_at")?,
        updated_at: row::get_timestamp(r, "updated_at")?,
    })
}

impl TaskRepository {
    pub async fn create<'e, E>(executor: E, task: &Task) -> DbResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO tasks (
                    id, list_id, board_id, title, description,
                    priority, deadline, position, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(task.id.to_string())
        .bind(task.list_id.to_string())
        .bind(task.board_id.to_string())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.priority.as_str())
        .bind(task.deadline.map(|dt| dt.timestamp()))
        .bind(task.position)
        .bind(task.created_at.timestamp())
        .bind(task.updated_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbResult<Option<Task>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let sql = format!("SELECT {} FROM tasks WHERE id = ?", TASK_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(executor)
            .await?;

        row.map(|r| map_task(&r)).transpose()
    }

    pub async fn find_by_list<'e, E>(executor: E, list_id: Uuid) -> DbResult<Vec<Task>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let sql = format!(
            "SELECT {} FROM tasks WHERE list_id = ? ORDER BY position",
            TASK_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(list_id.to_string())
            .fetch_all(executor)
            .await?;

        rows.iter().map(map_task).collect()
    }

    pub async fn find_by_board<'e, E>(executor: E, board_id: Uuid) -> DbResult<Vec<Task>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let sql = format!(
            "SELECT {} FROM tasks WHERE board_id = ? ORDER BY list_id, position",
            TASK_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(board_id.to_string())
            .fetch_all(executor)
            .await?;

        rows.iter().map(map_task).collect()
    }

    pub async fn count_by_list<'e, E>(executor: E, list_id: Uuid) -> DbResult<i64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE list_id = ?")
            .bind(list_id.to_string())
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    pub async fn update<'e, E>(executor: E, task: &Task) -> DbResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                UPDATE tasks
                SET list_id = ?, title = ?, description = ?,
                    priority = ?, deadline = ?, position = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(task.list_id.to_string())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.priority.as_str())
        .bind(task.deadline.map(|dt| dt.timestamp()))
        .bind(task.position)
        .bind(task.updated_at.timestamp())
        .bind(task.id.to_string())
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Rewrites only the placement columns. The move path calls this once
    /// per displaced task, inside the caller's transaction.
    pub async fn update_placement<'e, E>(
        executor: E,
        id: Uuid,
        list_id: Uuid,
        position: i32,
    ) -> DbResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                UPDATE tasks
                SET list_id = ?, position = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(list_id.to_string())
        .bind(position)
        .bind(chrono::Utc::now().timestamp())
        .bind(id.to_string())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn delete<'e, E>(executor: E, id: Uuid) -> DbResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id.to_string())
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Paged title/description substring search across one board, optionally
    /// narrowed to a single list. Returns the page plus the total match count.
    pub async fn search(
        pool: &sqlx::SqlitePool,
        board_id: Uuid,
        list_id: Option<Uuid>,
        q: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> DbResult<(Vec<Task>, i64)> {
        let board_id_str = board_id.to_string();
        let list_id_str = list_id.map(|id| id.to_string());
        let pattern = q.map(|s| format!("%{}%", s.trim()));

        let mut where_clause = String::from("WHERE board_id = ?");
        if list_id_str.is_some() {
            where_clause.push_str(" AND list_id = ?");
        }
        if pattern.is_some() {
            where_clause.push_str(" AND (title LIKE ? OR description LIKE ?)");
        }

        let count_sql = format!("SELECT COUNT(*) FROM tasks {}", where_clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(&board_id_str);
        if let Some(l) = &list_id_str {
            count_query = count_query.bind(l);
        }
        if let Some(p) = &pattern {
            count_query = count_query.bind(p).bind(p);
        }
        let total = count_query.fetch_one(pool).await?;

        let page_sql = format!(
            "SELECT {} FROM tasks {} ORDER BY created_at DESC, id LIMIT ? OFFSET ?",
            TASK_COLUMNS, where_clause
        );
        let mut page_query = sqlx::query(&page_sql).bind(&board_id_str);
        if let Some(l) = &list_id_str {
            page_query = page_query.bind(l);
        }
        if let Some(p) = &pattern {
            page_query = page_query.bind(p).bind(p);
        }
        let rows = page_query.bind(limit).bind(offset).fetch_all(pool).await?;

        let tasks = rows.iter().map(map_task).collect::<DbResult<Vec<_>>>()?;
        Ok((tasks, total))
    }

    pub async fn assignee_ids<'e, E>(executor: E, task_id: Uuid) -> DbResult<Vec<Uuid>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query("SELECT user_id FROM task_assignees WHERE task_id = ?")
            .bind(task_id.to_string())
            .fetch_all(executor)
            .await?;

        rows.iter().map(|r| row::get_uuid(r, "user_id")).collect()
    }

    /// All assignee links for a board in one query, for bulk task hydration.
    pub async fn assignees_for_board<'e, E>(
        executor: E,
        board_id: Uuid,
    ) -> DbResult<Vec<(Uuid, Uuid)>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query(
            r#"
                SELECT a.task_id, a.user_id
                FROM task_assignees a
                JOIN tasks t ON t.id = a.task_id
                WHERE t.board_id = ?
            "#,
        )
        .bind(board_id.to_string())
        .fetch_all(executor)
        .await?;

        rows.iter()
            .map(|r| Ok((row::get_uuid(r, "task_id")?, row::get_uuid(r, "user_id")?)))
            .collect()
    }

    pub async fn add_assignee<'e, E>(executor: E, task_id: Uuid, user_id: Uuid) -> DbResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT OR IGNORE INTO task_assignees (task_id, user_id)
                VALUES (?, ?)
            "#,
        )
        .bind(task_id.to_string())
        .bind(user_id.to_string())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn replace_assignees(
        conn: &mut sqlx::SqliteConnection,
        task_id: Uuid,
        user_ids: &[Uuid],
    ) -> DbResult<()> {
        let task_id_str = task_id.to_string();

        sqlx::query("DELETE FROM task_assignees WHERE task_id = ?")
            .bind(&task_id_str)
            .execute(&mut *conn)
            .await?;

        for user_id in user_ids {
            sqlx::query("INSERT OR IGNORE INTO task_assignees (task_id, user_id) VALUES (?, ?)")
                .bind(&task_id_str)
                .bind(user_id.to_string())
                .execute(&mut *conn)
                .await?;
        }

        Ok(())
    }
}
