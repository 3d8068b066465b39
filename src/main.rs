use std::sync::Arc;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use campus_crud_api::{
    app::{app, cors_layer},
    auth::JwtKeys,
    config::{self, Environment},
    database::Repositories,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting campus-crud-api in {:?} mode", config.environment);

    if config.security.jwt_secret == "development-only-secret" && config.environment != Environment::Development {
        anyhow::bail!("JWT_SECRET must be set outside development");
    }
    if campus_crud_api::is_development!() {
        tracing::warn!("Development mode: tokens are signed with a default secret unless JWT_SECRET is set");
    }

    let keys = Arc::new(JwtKeys::from_config(&config.security).context("invalid JWT configuration")?);
    let repos = Repositories::from_config(&config.database)
        .await
        .context("failed to initialise storage")?;

    let mut router = app(repos.clone(), keys).layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));
    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(pool) = repos.pool {
        pool.close().await;
        tracing::info!("Closed database pool");
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
