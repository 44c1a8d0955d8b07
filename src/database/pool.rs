use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::AppConfig;

/// Build the process-wide connection pool. Constructed once in main and
/// passed down through [`crate::state::AppState`]; closed on shutdown.
pub async fn connect(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    info!("created database pool ({} max connections)", config.max_connections);
    Ok(pool)
}
