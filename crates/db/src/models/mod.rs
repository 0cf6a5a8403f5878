//! Database models and DTOs.

pub mod recurring_template;
pub mod scheduled_post;
pub mod task;

pub use recurring_template::{CreateRecurringTemplate, RecurringTemplate};
pub use scheduled_post::{CreateScheduledPost, ScheduledPost};
pub use task::{NewTask, Task};
