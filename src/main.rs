use anyhow::Context;

use fintrack_api::config::AppConfig;
use fintrack_api::state::AppState;
use fintrack_api::{app, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fintrack_api=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;

    let pool = database::pool::connect(&config)
        .await
        .context("failed to connect to database")?;

    let state = AppState::new(pool.clone(), &config);
    let app = app::app(state, config.allowed_origin.clone());

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("fintrack API listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The server has drained; release the pool before exiting.
    pool.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
}
