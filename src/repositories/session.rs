use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use crate::{
    error::{AppError, Result},
    models::{session::Session, user::Role},
};

/// A helper function to map a `SqliteRow` to a `Session`.
fn row_to_session(row: &SqliteRow) -> Result<Session> {
    let role: String = row.try_get("role").map_err(|_| AppError::MissingData("role".to_string()))?;
    Ok(Session {
        token: row.try_get("token").map_err(|_| AppError::MissingData("token".to_string()))?,
        user_id: row.try_get("user_id").map_err(|_| AppError::MissingData("user_id".to_string()))?,
        role: role.parse::<Role>().map_err(AppError::MissingData)?,
        created_at: row.try_get("created_at").map_err(|_| AppError::MissingData("created_at".to_string()))?,
        expires_at: row.try_get("expires_at").map_err(|_| AppError::MissingData("expires_at".to_string()))?,
    })
}

/// Persists a new session.
pub async fn create_session(
    pool: &SqlitePool,
    token: &str,
    user_id: i64,
    role: Role,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> Result<Session> {
    let row = sqlx::query(
        r#"
        INSERT INTO sessions (token, user_id, role, created_at, expires_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING token, user_id, role, created_at, expires_at
        "#,
    )
    .bind(token)
    .bind(user_id)
    .bind(role.as_str())
    .bind(created_at)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;
    row_to_session(&row)
}

/// Finds a session by token, expired or not.
pub async fn find_by_token(pool: &SqlitePool, token: &str) -> Result<Option<Session>> {
    let row = sqlx::query(
        r#"
        SELECT token, user_id, role, created_at, expires_at
        FROM sessions
        WHERE token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;
    row.map(|r| row_to_session(&r)).transpose()
}

/// Deletes a session. Deleting an unknown token is not an error.
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Deletes every session that expired before `now`, returning how many went.
pub async fn delete_expired(pool: &SqlitePool, now: DateTime<Utc>) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
        .bind(now)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
