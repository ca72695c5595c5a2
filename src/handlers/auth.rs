use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use garde::Validate;
use serde::Deserialize;
use tower_cookies::{cookie::time::Duration, Cookie, Cookies};

use crate::{
    error::{AppError, Result},
    middleware_layer::auth::{extract_session_token, LOGIN_PATH, SESSION_COOKIE},
    models::user::Role,
    services::auth as auth_service,
    state::AppState,
};

/// Where a successful login lands.
const DASHBOARD_PATH: &str = "/auth/dashboard";

/// Placeholder body for the login view.
const LOGIN_VIEW: &str = "Login Page";

/// Placeholder body for the dashboard view.
const DASHBOARD_VIEW: &str = "Dashboard";

/// The login form. Missing fields are treated as empty.
#[derive(Deserialize, Default)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// The registration form.
#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    #[garde(length(min = 1, max = 255))]
    pub username: String,
    #[serde(default)]
    #[garde(skip)]
    pub password: String,
    #[garde(skip)]
    pub role: Option<String>,
}

/// Creates the session cookie for the given token.
fn create_session_cookie(token: String, max_age_days: i64, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
    cookie.set_max_age(Duration::days(max_age_days));
    cookie.set_path("/");
    cookie
}

/// Shows the login view.
#[axum::debug_handler]
pub async fn login_page() -> &'static str {
    LOGIN_VIEW
}

/// Handles a login form submission.
///
/// Bad credentials fall through to the login view without an error code. A
/// missing or unreadable form counts as empty credentials.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    form: std::result::Result<Form<LoginForm>, FormRejection>,
) -> Result<Response> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!("Unreadable login form: {}", rejection);
            LoginForm::default()
        }
    };
    tracing::info!("🔐 Login attempt for: {}", form.username);

    let Some(user) = auth_service::authenticate(&state.db, &form.username, &form.password).await? else {
        tracing::warn!("❌ Invalid credentials for: {}", form.username);
        return Ok(LOGIN_VIEW.into_response());
    };

    let session = auth_service::start_session(&state.db, &user, state.config.session_duration_days).await?;

    cookies.signed(&state.cookie_key).add(create_session_cookie(
        session.token,
        state.config.session_duration_days,
        state.config.secure_cookies,
    ));

    tracing::info!("✅ User logged in: {} ({})", user.id, user.role);
    Ok(Redirect::to(DASHBOARD_PATH).into_response())
}

/// Shows the dashboard view.
#[axum::debug_handler]
pub async fn dashboard() -> &'static str {
    DASHBOARD_VIEW
}

/// Handles user registration.
///
/// Unlike a free-form role column, only `manufacturer` and `retailer` are
/// accepted; any other role is a 400. A missing or empty role means
/// `manufacturer`. Passwords are not checked for strength, empty included.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    tracing::info!("📝 Register attempt for: {}", form.username);
    form.validate()?;

    let role = match form.role.as_deref() {
        None | Some("") => Role::default(),
        Some(value) => value.parse::<Role>().map_err(AppError::Validation)?,
    };

    let user = auth_service::register_user(&state.db, &form.username, &form.password, role).await?;

    tracing::info!("✅ User registered: {} as {}", user.id, user.role);
    Ok(Redirect::to(LOGIN_PATH).into_response())
}

/// Handles user logout.
#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Result<Response> {
    if let Some(token) = extract_session_token(&cookies, &state.cookie_key) {
        auth_service::end_session(&state.db, &token).await?;
    }

    let mut session_cookie = Cookie::new(SESSION_COOKIE, "");
    session_cookie.set_path("/");
    cookies.remove(session_cookie);

    tracing::info!("👋 Logged out");
    Ok(Redirect::to(LOGIN_PATH).into_response())
}
