//! The cron-invoked scheduler trigger.
//!
//! `GET /scheduler/run` executes one scheduler invocation and reports a
//! summary. The external caller's cadence is uncontrolled; the runner is
//! idempotent, so overlapping or rapid-fire calls are safe.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use flowdeck_scheduler::{PgSchedulerStore, SchedulerRunner};

use crate::state::AppState;

/// Response payload for a scheduler run.
///
/// `error` is present only when a sub-pipeline failed; the message still
/// reflects whatever the other pipeline accomplished.
#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /scheduler/run -- execute one scheduler invocation.
///
/// Returns 200 with a summary (including "no due work") or 500 when any
/// sub-pipeline failed, with the summary of partial progress alongside the
/// error.
async fn run_scheduler(State(state): State<AppState>) -> (StatusCode, Json<RunResponse>) {
    let store = PgSchedulerStore::new(state.pool.clone());
    let runner = SchedulerRunner::new(
        &store,
        state.claims.as_ref(),
        state.config.system_actor_id,
    );

    let report = runner.run(Utc::now()).await;

    let status = if report.has_errors() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    (
        status,
        Json(RunResponse {
            message: report.message(),
            error: report.error(),
        }),
    )
}

/// Mount scheduler routes (under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/scheduler/run", get(run_scheduler))
}
