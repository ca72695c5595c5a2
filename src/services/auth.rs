use chrono::{TimeDelta, Utc};
use sqlx::SqlitePool;
use crate::{
    crypto::{password as hashing, token},
    error::{AppError, Result},
    models::{
        session::Session,
        user::{Role, User},
    },
    repositories::{session as session_repo, user as user_repo},
};

/// Creates a new user with a hashed password.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `username` - The user's username.
/// * `password` - The user's plaintext password.
/// * `role` - The user's role.
///
/// # Returns
///
/// A `Result` containing the created `User`.
pub async fn register_user(
    db: &SqlitePool,
    username: &str,
    password: &str,
    role: Role,
) -> Result<User> {
    tracing::debug!("🔐 Creating user: {}", username);
    let hashed_password = hashing::hash_password(password)?;
    let user = user_repo::create_user(db, username, &hashed_password, role).await?;

    tracing::info!("✅ User created with ID: {}", user.id);
    Ok(user)
}

/// Checks a username and password against the stored hash.
///
/// # Returns
///
/// `Ok(Some(user))` on a match, `Ok(None)` for an unknown username or a wrong
/// password.
pub async fn authenticate(db: &SqlitePool, username: &str, password: &str) -> Result<Option<User>> {
    tracing::debug!("🔐 Authenticating user: {}", username);

    let Some(user) = user_repo::find_by_username(db, username).await? else {
        tracing::debug!("Unknown username: {}", username);
        return Ok(None);
    };

    if !hashing::verify_password(password, &user.password)? {
        tracing::debug!("Password mismatch for user: {}", user.id);
        return Ok(None);
    }

    tracing::info!("✅ User authenticated: {} ({})", user.id, user.username);
    Ok(Some(user))
}

/// Opens a session for an authenticated user.
///
/// A lifetime that does not fit in a timestamp is an `AppError::Internal`.
pub async fn start_session(db: &SqlitePool, user: &User, duration_days: i64) -> Result<Session> {
    let now = Utc::now();
    let expires_at = TimeDelta::try_days(duration_days)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            AppError::Internal(format!("Session lifetime of {} days is out of range", duration_days))
        })?;

    let token = token::generate_session_token()?;
    let session = session_repo::create_session(db, &token, user.id, user.role, now, expires_at).await?;

    tracing::info!("✅ Session started for user: {}", user.id);
    Ok(session)
}

/// Looks up a live session. An expired session is deleted and reported absent.
pub async fn resolve_session(db: &SqlitePool, token: &str) -> Result<Option<Session>> {
    let Some(session) = session_repo::find_by_token(db, token).await? else {
        return Ok(None);
    };

    if session.is_expired(Utc::now()) {
        tracing::warn!("❌ Session expired for user: {}", session.user_id);
        session_repo::delete_session(db, token).await?;
        return Ok(None);
    }

    Ok(Some(session))
}

/// Ends a session. Unknown tokens are ignored.
pub async fn end_session(db: &SqlitePool, token: &str) -> Result<()> {
    session_repo::delete_session(db, token).await?;
    tracing::info!("✅ Session ended");
    Ok(())
}

/// Removes every expired session.
pub async fn purge_expired_sessions(db: &SqlitePool) -> Result<u64> {
    let removed = session_repo::delete_expired(db, Utc::now()).await?;
    tracing::debug!("Purged {} expired sessions", removed);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use chrono::Duration;

    async fn pool() -> SqlitePool {
        let pool = db::create_pool("sqlite::memory:", 1).await.unwrap();
        db::create_tables(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn register_then_authenticate() {
        let db = pool().await;
        let registered = register_user(&db, "maker", "s3cret", Role::Manufacturer).await.unwrap();

        let user = authenticate(&db, "maker", "s3cret").await.unwrap().unwrap();
        assert_eq!(user.id, registered.id);
        assert_eq!(user.role, Role::Manufacturer);

        assert!(authenticate(&db, "maker", "wrong").await.unwrap().is_none());
        assert!(authenticate(&db, "nobody", "s3cret").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stored_hash_is_not_the_plaintext() {
        let db = pool().await;
        let user = register_user(&db, "shop", "plaintext", Role::Retailer).await.unwrap();

        let stored = user_repo::find_by_id(&db, user.id).await.unwrap().unwrap();
        assert_ne!(stored.password, "plaintext");
        assert!(!stored.password.contains("plaintext"));
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let db = pool().await;
        register_user(&db, "dup", "one", Role::Retailer).await.unwrap();
        let err = register_user(&db, "dup", "two", Role::Retailer).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn session_carries_the_users_role() {
        let db = pool().await;
        let user = register_user(&db, "shop", "pw", Role::Retailer).await.unwrap();

        let session = start_session(&db, &user, 7).await.unwrap();
        assert_eq!(session.user_id, user.id);
        assert_eq!(session.role, Role::Retailer);

        let resolved = resolve_session(&db, &session.token).await.unwrap().unwrap();
        assert_eq!(resolved.user_id, user.id);
        assert_eq!(resolved.role, Role::Retailer);
    }

    #[tokio::test]
    async fn expired_session_is_rejected_and_removed() {
        let db = pool().await;
        let user = register_user(&db, "old", "pw", Role::Manufacturer).await.unwrap();
        let past = Utc::now() - Duration::days(2);
        session_repo::create_session(&db, "stale", user.id, user.role, past, past + Duration::days(1))
            .await
            .unwrap();

        assert!(resolve_session(&db, "stale").await.unwrap().is_none());
        assert!(session_repo::find_by_token(&db, "stale").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn purge_only_touches_expired_sessions() {
        let db = pool().await;
        let user = register_user(&db, "mixed", "pw", Role::Manufacturer).await.unwrap();
        let past = Utc::now() - Duration::days(2);
        session_repo::create_session(&db, "stale", user.id, user.role, past, past + Duration::days(1))
            .await
            .unwrap();
        let live = start_session(&db, &user, 1).await.unwrap();

        assert_eq!(purge_expired_sessions(&db).await.unwrap(), 1);
        assert!(resolve_session(&db, &live.token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn ended_session_no_longer_resolves() {
        let db = pool().await;
        let user = register_user(&db, "leaver", "pw", Role::Retailer).await.unwrap();
        let session = start_session(&db, &user, 1).await.unwrap();

        end_session(&db, &session.token).await.unwrap();
        end_session(&db, &session.token).await.unwrap();
        assert!(resolve_session(&db, &session.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn session_requires_existing_user() {
        let db = pool().await;
        let now = Utc::now();
        let err = session_repo::create_session(&db, "orphan", 999, Role::Retailer, now, now + Duration::days(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn oversized_lifetime_is_an_error_not_a_panic() {
        let db = pool().await;
        let user = register_user(&db, "forever", "pw", Role::Retailer).await.unwrap();

        let err = start_session(&db, &user, 100_000_000).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(&db)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
