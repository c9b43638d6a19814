//! Column decode helpers for hand-mapped rows. UUIDs live in TEXT columns
//! and timestamps in INTEGER columns of Unix seconds, so every repository
//! goes through these instead of repeating the parse-and-wrap dance.

use crate::error::{DbError, Result};

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

pub(crate) fn get_uuid(row: &SqliteRow, column: &str) -> Result<Uuid> {
    let raw: String = row.try_get(column)?;
    Uuid::parse_str(&raw)
        .map_err(|e| DbError::decode(format!("Invalid UUID in {}: {}", column, e)))
}

pub(crate) fn get_opt_uuid(row: &SqliteRow, column: &str) -> Result<Option<Uuid>> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|s| {
        Uuid::parse_str(&s)
            .map_err(|e| DbError::decode(format!("Invalid UUID in {}: {}", column, e)))
    })
    .transpose()
}

pub(crate) fn get_timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>> {
    let secs: i64 = row.try_get(column)?;
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| DbError::decode(format!("Invalid timestamp in {}", column)))
}

pub(crate) fn get_opt_timestamp(row: &SqliteRow, column: &str) -> Result<Option<DateTime<Utc>>> {
    let secs: Option<i64> = row.try_get(column)?;
    secs.map(|s| {
        DateTime::from_timestamp(s, 0)
            .ok_or_else(|| DbError::decode(format!("Invalid timestamp in {}", column)))
    })
    .transpose()
}
