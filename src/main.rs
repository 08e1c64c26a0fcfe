use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cinepick_api::{
    api::{create_router, AppState, RouterOptions},
    config::Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    if config.uses_insecure_secret() {
        tracing::warn!("SECRET_KEY is not set; session cookies are signed with a public placeholder");
    }

    // Initialize application state
    let state = AppState::from_config(&config).await?;

    // Create the router with all routes
    let app = create_router(state, &RouterOptions::from_config(&config));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, data_dir = %config.data_dir.display(), "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(err) => tracing::error!(?err, "Failed to listen for shutdown signal"),
    }
}
