use std::sync::Arc;

use flowdeck_scheduler::HttpClaimsProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: flowdeck_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Identity-claims client shared across scheduler invocations.
    pub claims: Arc<HttpClaimsProvider>,
}
