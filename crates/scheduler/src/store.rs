//! Store seam for the scheduler.
//!
//! [`SchedulerStore`] is the repository interface the runner drives; the
//! production implementation delegates to the `flowdeck-db` repositories.
//! Keeping the runner behind a trait lets the orchestration logic be tested
//! against an in-memory store with no database.

use async_trait::async_trait;
use chrono::NaiveDate;

use flowdeck_core::types::Timestamp;
use flowdeck_db::models::{NewTask, RecurringTemplate};
use flowdeck_db::repositories::{RecurringTemplateRepo, RunCommit, ScheduledPostRepo, TaskRepo};
use flowdeck_db::DbPool;

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying database call failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store is unreachable or refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Store operations the scheduler consumes.
#[async_trait]
pub trait SchedulerStore: Send + Sync {
    /// Fetch all recurring templates. No date filter: due-ness is decided
    /// by the cadence evaluator, not the query.
    async fn load_templates(&self) -> Result<Vec<RecurringTemplate>, StoreError>;

    /// Atomically insert the given tasks and advance their templates'
    /// watermarks to `day`. All or nothing; templates whose watermark
    /// already reached `day` are skipped inside the transaction.
    async fn commit_run(&self, tasks: &[NewTask], day: NaiveDate)
        -> Result<RunCommit, StoreError>;

    /// Promote every scheduled post whose time has passed to `posted`,
    /// returning the number promoted.
    async fn publish_due_posts(&self, now: Timestamp) -> Result<u64, StoreError>;
}

/// PostgreSQL-backed [`SchedulerStore`] delegating to the repositories.
pub struct PgSchedulerStore {
    pool: DbPool,
}

impl PgSchedulerStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchedulerStore for PgSchedulerStore {
    async fn load_templates(&self) -> Result<Vec<RecurringTemplate>, StoreError> {
        Ok(RecurringTemplateRepo::list_all(&self.pool).await?)
    }

    async fn commit_run(
        &self,
        tasks: &[NewTask],
        day: NaiveDate,
    ) -> Result<RunCommit, StoreError> {
        Ok(TaskRepo::commit_run(&self.pool, tasks, day).await?)
    }

    async fn publish_due_posts(&self, now: Timestamp) -> Result<u64, StoreError> {
        Ok(ScheduledPostRepo::publish_due(&self.pool, now).await?)
    }
}
