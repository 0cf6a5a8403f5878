//! Repository for the `tasks` table, including the scheduler's atomic
//! run commit.

use chrono::NaiveDate;
use sqlx::PgPool;

use flowdeck_core::types::DbId;

use crate::models::task::{NewTask, Task};

const COLUMNS: &str = "id, template_id, title, description, brand_id, priority, \
     assignee_ids, company_id, status, created_by, start_date, created_at";

/// Outcome of one atomic run commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCommit {
    /// Tasks inserted (equal to the number of watermarks advanced).
    pub tasks_created: u64,
    /// Templates whose watermark had already reached `day` when the commit
    /// ran; their task insert was skipped inside the same transaction.
    pub templates_skipped: u64,
}

/// Provides task persistence for the scheduler.
pub struct TaskRepo;

impl TaskRepo {
    /// Commit one scheduler run: insert every materialized task and advance
    /// the corresponding template watermarks to `day`, all in a single
    /// transaction. Either everything lands or nothing does.
    ///
    /// The watermark advance is an optimistic conditional write: it only
    /// succeeds while `last_generated_at` is still behind `day`. A template
    /// that lost the race to an overlapping invocation is skipped without
    /// inserting its task, so two same-day runs can never produce a
    /// duplicate.
    pub async fn commit_run(
        pool: &PgPool,
        tasks: &[NewTask],
        day: NaiveDate,
    ) -> Result<RunCommit, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut commit = RunCommit::default();

        for task in tasks {
            let advanced = sqlx::query(
                "UPDATE recurring_task_templates \
                 SET last_generated_at = $2, updated_at = now() \
                 WHERE id = $1 \
                   AND (last_generated_at IS NULL OR last_generated_at < $2)",
            )
            .bind(task.template_id)
            .bind(day)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if advanced == 0 {
                commit.templates_skipped += 1;
                continue;
            }

            sqlx::query(
                "INSERT INTO tasks \
                    (template_id, title, description, brand_id, priority, \
                     assignee_ids, company_id, status, created_by, start_date) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            )
            .bind(task.template_id)
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.brand_id)
            .bind(&task.priority)
            .bind(&task.assignee_ids)
            .bind(task.company_id)
            .bind(&task.status)
            .bind(task.created_by)
            .bind(task.start_date)
            .execute(&mut *tx)
            .await?;

            commit.tasks_created += 1;
        }

        tx.commit().await?;
        Ok(commit)
    }

    /// Find a task by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tasks materialized from a given template, oldest first.
    pub async fn list_by_template(
        pool: &PgPool,
        template_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE template_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(template_id)
            .fetch_all(pool)
            .await
    }

    /// Count tasks materialized from a given template.
    pub async fn count_by_template(pool: &PgPool, template_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE template_id = $1")
            .bind(template_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
