//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache construction, and Axum server
//! lifecycle.

use crate::application::services::UserService;
use crate::config::Config;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::PgUserRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Migrations (schema + seed data)
/// - Cache backend selected by `CACHE_BACKEND`
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, the remote cache connection
/// (when selected), the server bind, or the server runtime fails. The
/// backend choice is fixed at startup, so an unreachable Redis aborts
/// startup instead of silently serving from the local store.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let cache = Arc::new(
        CacheService::from_config(&config)
            .await
            .context("Failed to initialize cache backend")?,
    );
    tracing::info!("Cache backend: {}", cache.backend_kind().as_str());

    let pool = Arc::new(pool);
    let user_repository = Arc::new(PgUserRepository::new(Arc::clone(&pool)));
    let user_service = Arc::new(UserService::new(user_repository, Arc::clone(&cache)));

    let state = AppState::new(pool, user_service, cache);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
