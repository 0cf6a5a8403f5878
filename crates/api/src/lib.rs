//! HTTP surface for the flowdeck scheduler.
//!
//! Exposes exactly two routes: the root-level health check and the
//! cron-invoked `GET /api/v1/scheduler/run` trigger. The scheduler is not
//! otherwise reachable over the wire.

pub mod config;
pub mod routes;
pub mod state;
