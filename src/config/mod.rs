use anyhow::Context;
use axum::http::HeaderValue;
use std::env;

/// Runtime configuration, resolved once at startup and handed to the
/// components that need it. All values come from the environment (plus .env
/// in development); missing mandatory values abort startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub allowed_origin: HeaderValue,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(3000);

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;

        let allowed_origin = env::var("ALLOWED_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .parse::<HeaderValue>()
            .context("ALLOWED_ORIGIN is not a valid header value")?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(10);

        Ok(Self {
            port,
            database_url,
            jwt_secret,
            allowed_origin,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_defaults_with_required_vars() {
        env::set_var("DATABASE_URL", "postgres://localhost/fintrack");
        env::set_var("JWT_SECRET", "test-secret");
        env::remove_var("PORT");
        env::remove_var("DATABASE_MAX_CONNECTIONS");
        env::remove_var("ALLOWED_ORIGIN");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.allowed_origin, "http://localhost:3000");
    }
}
