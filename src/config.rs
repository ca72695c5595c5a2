use std::env;
use std::net::SocketAddr;
use anyhow::{Context, Result};
use zeroize::Zeroizing;

/// Longest accepted session lifetime, in days.
pub const MAX_SESSION_DURATION_DAYS: i64 = 3650;

/// Secret used when `SECRET_KEY` is not provided. Fine for local runs only.
const DEFAULT_SECRET_KEY: &str = "change-this-secret-key";

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The URL of the SQLite database.
    pub database_url: String,
    /// The maximum number of pooled database connections.
    pub db_max_connections: u32,
    /// The secret the cookie signing key is derived from.
    pub secret_key: Zeroizing<String>,
    /// The duration of a session in days.
    pub session_duration_days: i64,
    /// The address the HTTP server binds to.
    pub server_addr: SocketAddr,
    /// Whether the dashboard is placed behind the access-control middleware.
    pub dashboard_requires_login: bool,
    /// Whether cookies are marked `Secure`.
    pub secure_cookies: bool,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        let secret_key = match env::var("SECRET_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => {
                tracing::warn!("⚠️ SECRET_KEY not set, using the built-in development key");
                DEFAULT_SECRET_KEY.to_string()
            }
        };

        let session_duration_days = parse_session_duration_days(
            &env::var("SESSION_DURATION_DAYS").unwrap_or_else(|_| "7".to_string()),
        )?;

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://arivu.db".to_string()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("Invalid DB_MAX_CONNECTIONS")?,
            secret_key: Zeroizing::new(secret_key),
            session_duration_days,
            server_addr: env::var("SERVER_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:5000".to_string())
                .parse()
                .context("Invalid SERVER_ADDR")?,
            dashboard_requires_login: env::var("DASHBOARD_REQUIRES_LOGIN")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .context("DASHBOARD_REQUIRES_LOGIN must be true or false")?,
            secure_cookies: env::var("APP_ENV")
                .unwrap_or_else(|_| "development".to_string())
                == "production",
        })
    }
}

/// Parses a session lifetime, accepting 1 to `MAX_SESSION_DURATION_DAYS` days.
fn parse_session_duration_days(value: &str) -> Result<i64> {
    let days: i64 = value.trim().parse().context("Invalid SESSION_DURATION_DAYS")?;

    if !(1..=MAX_SESSION_DURATION_DAYS).contains(&days) {
        anyhow::bail!(
            "SESSION_DURATION_DAYS must be between 1 and {}",
            MAX_SESSION_DURATION_DAYS
        );
    }

    Ok(days)
}

#[cfg(test)]
impl Config {
    /// A configuration pointing at a private in-memory database.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            secret_key: Zeroizing::new("test-secret-key".to_string()),
            session_duration_days: 7,
            server_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            dashboard_requires_login: false,
            secure_cookies: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_duration_accepts_sane_values() {
        assert_eq!(parse_session_duration_days("7").unwrap(), 7);
        assert_eq!(parse_session_duration_days("1").unwrap(), 1);
        assert_eq!(
            parse_session_duration_days("3650").unwrap(),
            MAX_SESSION_DURATION_DAYS
        );
    }

    #[test]
    fn session_duration_rejects_out_of_range_values() {
        assert!(parse_session_duration_days("0").is_err());
        assert!(parse_session_duration_days("-3").is_err());
        assert!(parse_session_duration_days("3651").is_err());
        assert!(parse_session_duration_days("100000000").is_err());
        assert!(parse_session_duration_days("a week").is_err());
    }
}
