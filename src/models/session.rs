use chrono::{DateTime, Utc};
use crate::models::user::Role;

/// Represents a server-side login session.
///
/// The `token` is the only part the client ever sees, inside the signed
/// `session_id` cookie.
#[derive(Debug, Clone)]
pub struct Session {
    /// The opaque token identifying the session.
    pub token: String,
    /// The ID of the user this session belongs to.
    pub user_id: i64,
    /// The user's role at login time.
    pub role: Role,
    /// The timestamp when the session was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the session expires.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has passed its expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
