use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_cookies::CookieManagerLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::{
    handlers,
    middleware_layer::auth::{authenticated, require_capability, Guard},
    state::AppState,
};

/// Builds the application router: `/auth/*` form routes and the `/products`
/// JSON API.
pub fn create_router(state: AppState) -> Router {
    let mut dashboard_routes =
        Router::new().route("/auth/dashboard", get(handlers::auth::dashboard));

    if state.config.dashboard_requires_login {
        dashboard_routes = dashboard_routes.route_layer(from_fn_with_state(
            Guard::new(state.clone(), authenticated),
            require_capability,
        ));
    } else {
        tracing::warn!("⚠️ Dashboard is not behind the access-control middleware");
    }

    let auth_routes = Router::new()
        .route(
            "/auth/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/logout", post(handlers::auth::logout))
        .merge(dashboard_routes);

    let product_routes = Router::new()
        .route(
            "/products/",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        );

    Router::new()
        .merge(auth_routes)
        .merge(product_routes)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new())
}
