//! The recurring-workflow scheduler engine.
//!
//! One invocation of [`runner::SchedulerRunner`] drives a linear pipeline:
//! load templates, evaluate cadences, materialize due tasks, commit tasks
//! and watermarks atomically, propagate mandatory-acknowledgment flags
//! best-effort, and publish due social posts. The runner is stateless and
//! safe to invoke arbitrarily often: idempotency comes from the per-template
//! watermark and the posted-status exclusion, not from locking or
//! invocation spacing.

pub mod claims;
pub mod materialize;
pub mod runner;
pub mod store;

pub use claims::{ClaimsError, ClaimsProvider, FlagPropagator, FlagResult, HttpClaimsProvider};
pub use runner::{RunReport, SchedulerRunner};
pub use store::{PgSchedulerStore, SchedulerStore, StoreError};
