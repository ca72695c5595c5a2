use sha2::{Digest, Sha512};
use sqlx::SqlitePool;
use tower_cookies::Key;
use crate::config::Config;
use crate::error::Result;

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: SqlitePool,
    /// The application's configuration.
    pub config: Config,
    /// The key session cookies are signed with.
    pub cookie_key: Key,
}

impl AppState {
    /// Creates a new `AppState`, opening the pool and ensuring the schema.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = crate::db::create_pool(&config.database_url, config.db_max_connections).await?;
        tracing::info!("✅ SQLite pool initialized: {}", config.database_url);

        crate::db::create_tables(&db).await?;
        tracing::info!("✅ Tables ready");

        let cookie_key = derive_cookie_key(&config.secret_key);
        tracing::info!("✅ Cookie signing key derived");

        Ok(AppState {
            db,
            config: config.clone(),
            cookie_key,
        })
    }
}

/// Stretches an arbitrary-length secret into the 64 bytes a signing `Key` needs.
fn derive_cookie_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

#[cfg(test)]
impl AppState {
    /// State backed by a fresh in-memory database.
    pub async fn for_tests() -> Self {
        Self::with_config(Config::for_tests()).await
    }

    /// State backed by a fresh in-memory database and the given configuration.
    pub async fn with_config(config: Config) -> Self {
        AppState::new(&config).await.expect("test state")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_key_is_deterministic_per_secret() {
        let a = derive_cookie_key("alpha");
        let b = derive_cookie_key("alpha");
        let c = derive_cookie_key("beta");

        assert_eq!(a.master(), b.master());
        assert_ne!(a.master(), c.master());
    }
}
