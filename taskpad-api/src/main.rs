//! # Taskpad API Server
//!
//! REST API for token-based user authentication and task CRUD.
//!
//! ## Startup sequence
//!
//! 1. Initialize tracing from `RUST_LOG`
//! 2. Load configuration from the environment
//! 3. Create the database pool and run migrations
//! 4. Purge revocations for tokens that have expired anyway
//! 5. Serve until SIGINT
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskpad-api
//! ```

use taskpad_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskpad_shared::{
    db::{
        migrations::run_migrations,
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    models::revoked_token::RevokedToken,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskpad_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Taskpad API Server v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    // Revocations for long-expired tokens are dead weight
    match RevokedToken::purge_expired(&pool).await {
        Ok(purged) if purged > 0 => {
            tracing::info!(purged, "Removed expired token revocations")
        }
        Ok(_) => {}
        Err(e) => tracing::warn!("Failed to purge expired revocations: {}", e),
    }

    let addr = config.bind_address();
    let state = AppState::new(pool.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
