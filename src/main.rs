use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod state;
mod db;
mod response;
mod router;

mod crypto {
    pub mod password;
    pub mod token;
}

mod models {
    pub mod user;
    pub mod session;
    pub mod product;
}

mod repositories {
    pub mod user;
    pub mod session;
    pub mod product;
}

mod services {
    pub mod auth;
    pub mod products;
}

mod handlers {
    pub mod auth;
    pub mod products;
}

mod middleware_layer {
    pub mod auth;
}

use config::Config;
use state::AppState;

/// How often expired sessions are swept from the store.
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(3600);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let state = AppState::new(&config).await?;
    tracing::info!("✅ AppState initialized");

    let app = router::create_router(state.clone());

    let cleanup_state = state.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(SESSION_PURGE_INTERVAL).await;
            tracing::info!("🧹 Purging expired sessions...");
            match services::auth::purge_expired_sessions(&cleanup_state.db).await {
                Ok(removed) => {
                    tracing::info!("✅ Session purge completed, removed {}", removed);
                }
                Err(e) => {
                    tracing::error!("❌ Session purge failed: {}", e);
                }
            }
        }
    });

    let addr = config.server_addr;
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
