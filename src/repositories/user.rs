use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use crate::{
    error::{AppError, Result},
    models::user::{Role, User},
};

/// A helper function to map a `SqliteRow` to a `User`.
fn row_to_user(row: &SqliteRow) -> Result<User> {
    let role: String = row.try_get("role").map_err(|_| AppError::MissingData("role".to_string()))?;
    Ok(User {
        id: row.try_get("id").map_err(|_| AppError::MissingData("id".to_string()))?,
        username: row.try_get("username").map_err(|_| AppError::MissingData("username".to_string()))?,
        password: row.try_get("password").map_err(|_| AppError::MissingData("password".to_string()))?,
        role: role.parse::<Role>().map_err(AppError::MissingData)?,
    })
}

/// Creates a new user in the database.
///
/// A taken username surfaces as `AppError::Conflict`.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    role: Role,
) -> Result<User> {
    let row = sqlx::query(
        r#"
        INSERT INTO users (username, password, role)
        VALUES (?, ?, ?)
        RETURNING id, username, password, role
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(role.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Username already taken".to_string())
        }
        other => AppError::Database(other),
    })?;
    row_to_user(&row)
}

/// Finds a user by username, taking the oldest row should duplicates exist.
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT id, username, password, role
        FROM users
        WHERE username = ?
        ORDER BY id
        LIMIT 1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    row.map(|r| row_to_user(&r)).transpose()
}

/// Finds a user by their ID.
#[cfg(test)]
pub async fn find_by_id(pool: &SqlitePool, user_id: i64) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT id, username, password, role
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    row.map(|r| row_to_user(&r)).transpose()
}
