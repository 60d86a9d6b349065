//! Repository functions for the users table.

use chrono::Utc;
use sqlx::PgPool;

use crate::models::user::User;

pub async fn create_user(pool: &PgPool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO users (id, email, hashed_password, reset_token, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(&user.id)
    .bind(&user.email)
    .bind(&user.hashed_password)
    .bind(&user.reset_token)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn find_user_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, hashed_password, reset_token, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, hashed_password, reset_token, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_user_by_reset_token(
    pool: &PgPool,
    reset_token: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, hashed_password, reset_token, created_at, updated_at
        FROM users
        WHERE reset_token = $1
        "#,
    )
    .bind(reset_token)
    .fetch_optional(pool)
    .await
}

pub async fn set_reset_token(
    pool: &PgPool,
    user_id: &str,
    reset_token: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET reset_token = $1, updated_at = $2 WHERE id = $3")
        .bind(reset_token)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Stores the new hash and consumes the outstanding reset token in one write.
pub async fn update_password(
    pool: &PgPool,
    user_id: &str,
    hashed_password: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE users SET hashed_password = $1, reset_token = NULL, updated_at = $2 WHERE id = $3",
    )
    .bind(hashed_password)
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
