//! Route definitions.

pub mod health;
pub mod scheduler;

use axum::Router;

use crate::state::AppState;

/// Routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(scheduler::router())
}
