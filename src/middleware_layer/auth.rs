use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::{Cookies, Key};

use crate::{
    error::{AppError, Result},
    models::session::Session,
    services::auth as auth_service,
    state::AppState,
};

/// The cookie holding the signed session token.
pub const SESSION_COOKIE: &str = "session_id";

/// Where unauthenticated requests are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// A check a live session must pass to reach a guarded route.
pub type Capability = fn(&Session) -> bool;

/// Admits any live session.
pub fn authenticated(_session: &Session) -> bool {
    true
}

/// The state handed to `require_capability`.
#[derive(Clone)]
pub struct Guard {
    state: AppState,
    capability: Capability,
}

impl Guard {
    /// Creates a guard that admits sessions passing `capability`.
    pub fn new(state: AppState, capability: Capability) -> Self {
        Self { state, capability }
    }
}

/// Reads the session token from the signed cookie.
///
/// Cookies with a missing or forged signature are ignored.
pub fn extract_session_token(cookies: &Cookies, key: &Key) -> Option<String> {
    cookies
        .signed(key)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Resolves the session attached to the request, if any.
pub async fn current_session(state: &AppState, cookies: &Cookies) -> Result<Option<Session>> {
    match extract_session_token(cookies, &state.cookie_key) {
        Some(token) => auth_service::resolve_session(&state.db, &token).await,
        None => Ok(None),
    }
}

/// A middleware that requires a live session passing the guard's capability.
///
/// Requests without a session are redirected to the login page; sessions
/// failing the capability get a 403. On success the `Session` is available to
/// the handler as an `Extension`.
pub async fn require_capability(
    State(guard): State<Guard>,
    cookies: Cookies,
    mut request: Request,
    next: Next,
) -> Response {
    tracing::debug!("🔐 Checking authentication...");

    let session = match current_session(&guard.state, &cookies).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            tracing::warn!("❌ No valid session, redirecting to login");
            return Redirect::to(LOGIN_PATH).into_response();
        }
        Err(e) => return e.into_response(),
    };

    if !(guard.capability)(&session) {
        tracing::warn!("❌ Capability check failed for user: {}", session.user_id);
        return AppError::Unauthorized.into_response();
    }

    tracing::debug!(
        "✅ User authenticated: {} (session opened {})",
        session.user_id,
        session.created_at
    );
    request.extensions_mut().insert(session);

    next.run(request).await
}
