use crate::error::Result as DbResult;
use crate::row;

use td_core::UserSummary;

use sqlx::Row;
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    pub async fn create<'e, E>(executor: E, user: &UserSummary) -> DbResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO users (id, username, email, created_at)
                VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(chrono::Utc::now().timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Insert the user if no row with this id exists yet. Used to materialize
    /// externally-authenticated principals before their first write.
    pub async fn ensure<'e, E>(executor: E, user: &UserSummary) -> DbResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT OR IGNORE INTO users (id, username, email, created_at)
                VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(chrono::Utc::now().timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbResult<Option<UserSummary>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query(
            r#"
                SELECT id, username, email
                FROM users
                WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        row.map(|r| {
            Ok(UserSummary {
                id: row::get_uuid(&r, "id")?,
                username: r.try_get("username")?,
                email: r.try_get("email")?,
            })
        })
        .transpose()
    }

    pub async fn find_by_username<'e, E>(
        executor: E,
        username: &str,
    ) -> DbResult<Option<UserSummary>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query(
            r#"
                SELECT id, username, email
                FROM users
                WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(executor)
        .await?;

        row.map(|r| {
            Ok(UserSummary {
                id: row::get_uuid(&r, "id")?,
                username: r.try_get("username")?,
                email: r.try_get("email")?,
            })
        })
        .transpose()
    }

    /// Batch lookup for assignee display. Ids not present in the table are
    /// silently absent from the result.
    pub async fn find_summaries<'e, E>(executor: E, ids: &[Uuid]) -> DbResult<Vec<UserSummary>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT id, username, email FROM users WHERE id IN ({}) ORDER BY username",
            placeholders
        );

        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id.to_string());
        }

        let rows = query.fetch_all(executor).await?;

        rows.into_iter()
            .map(|r| {
                Ok(UserSummary {
                    id: row::get_uuid(&r, "id")?,
                    username: r.try_get("username")?,
                    email: r.try_get("email")?,
                })
            })
            .collect()
    }
}
