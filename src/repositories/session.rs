//! Repository functions for the sessions table.
//!
//! Every lookup is a row-level read against the live connection, so callers
//! always observe the current source of truth. Nothing here caches.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::session::SessionRecord;

pub async fn insert_session(pool: &PgPool, record: &SessionRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO sessions (session_id, user_id, created_at)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(&record.session_id)
    .bind(&record.user_id)
    .bind(record.created_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn find_session_by_id(
    pool: &PgPool,
    session_id: &str,
) -> Result<Option<SessionRecord>, sqlx::Error> {
    sqlx::query_as::<_, SessionRecord>(
        r#"
        SELECT session_id, user_id, created_at
        FROM sessions
        WHERE session_id = $1
        "#,
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_session_by_id(pool: &PgPool, session_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE session_id = $1")
        .bind(session_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Removes records older than `cutoff`. Only the maintenance binary calls
/// this; the resolve path leaves expired records in place.
pub async fn delete_sessions_created_before(
    pool: &PgPool,
    cutoff: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE created_at < $1")
        .bind(cutoff)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
