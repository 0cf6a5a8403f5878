//! Pure domain logic for the flowdeck scheduler.
//!
//! This crate has zero internal dependencies so it can be used by the
//! repository layer, the scheduler engine, and any future worker or CLI
//! tooling. Everything here is side-effect free and unit-testable with
//! fixed dates.

pub mod error;
pub mod recurrence;
pub mod status;
pub mod types;
