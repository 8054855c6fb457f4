//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod boundary;
mod config;

use auth::{PgUserRepository, auth_router};
use platform::rate_limit::{MemoryRateLimitStore, RateLimiter};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,platform=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Rate limiting: counters live in process memory, pruned once per window
    let rate_limit_store = Arc::new(MemoryRateLimitStore::new());
    let _pruner = rate_limit_store
        .clone()
        .spawn_pruner(config.rate_limit.clone());
    let limiter = RateLimiter::new(rate_limit_store, config.rate_limit.clone());

    tracing::info!(
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window.as_secs(),
        trust_proxy = config.rate_limit.trust_proxy,
        "Rate limiter configured"
    );

    let cors = app::cors_layer(config.frontend_origins.as_deref());

    // Build router
    let auth = auth_router(PgUserRepository::new(pool), config.auth.clone());
    let app = app::build_app(auth, limiter, cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
