use flowdeck_core::types::DbId;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the identity-claims service.
    pub identity_base_url: String,
    /// User id recorded as `created_by` on scheduler-materialized tasks.
    /// An explicit value, not a global singleton actor.
    pub system_actor_id: DbId,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `IDENTITY_BASE_URL`    | `http://localhost:4000`    |
    /// | `SYSTEM_ACTOR_ID`      | `1`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let identity_base_url =
            std::env::var("IDENTITY_BASE_URL").unwrap_or_else(|_| "http://localhost:4000".into());

        let system_actor_id: DbId = std::env::var("SYSTEM_ACTOR_ID")
            .unwrap_or_else(|_| "1".into())
            .parse()
            .expect("SYSTEM_ACTOR_ID must be a valid i64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            identity_base_url,
            system_actor_id,
        }
    }
}
