use sqlx::PgPool;

use crate::auth::token::TokenKeys;
use crate::config::AppConfig;

/// Shared application state: the connection pool and the token keys, built
/// once at startup and cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: TokenKeys,
}

impl AppState {
    pub fn new(pool: PgPool, config: &AppConfig) -> Self {
        Self {
            pool,
            tokens: TokenKeys::new(config.jwt_secret.as_bytes()),
        }
    }
}
