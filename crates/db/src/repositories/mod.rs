//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod recurring_template_repo;
pub mod scheduled_post_repo;
pub mod task_repo;

pub use recurring_template_repo::RecurringTemplateRepo;
pub use scheduled_post_repo::ScheduledPostRepo;
pub use task_repo::{RunCommit, TaskRepo};
