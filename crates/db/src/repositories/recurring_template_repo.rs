//! Repository for the `recurring_task_templates` table.

use sqlx::PgPool;

use flowdeck_core::types::DbId;

use crate::models::recurring_template::{CreateRecurringTemplate, RecurringTemplate};

const COLUMNS: &str = "id, title, description, frequency, days_of_week, day_of_month, \
     assignee_ids, brand_id, priority, is_mandatory, company_id, \
     last_generated_at, created_at, updated_at";

/// Provides access to recurring task templates.
///
/// The scheduler treats templates as read-only input; only the
/// `last_generated_at` watermark is written, and only inside the atomic
/// run commit (see [`crate::repositories::TaskRepo::commit_run`]).
pub struct RecurringTemplateRepo;

impl RecurringTemplateRepo {
    /// Insert a new template, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRecurringTemplate,
    ) -> Result<RecurringTemplate, sqlx::Error> {
        let query = format!(
            "INSERT INTO recurring_task_templates \
                (title, description, frequency, days_of_week, day_of_month, \
                 assignee_ids, brand_id, priority, is_mandatory, company_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'medium'), $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecurringTemplate>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.frequency)
            .bind(&input.days_of_week)
            .bind(input.day_of_month)
            .bind(&input.assignee_ids)
            .bind(input.brand_id)
            .bind(&input.priority)
            .bind(input.is_mandatory)
            .bind(input.company_id)
            .fetch_one(pool)
            .await
    }

    /// Find a template by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RecurringTemplate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recurring_task_templates WHERE id = $1");
        sqlx::query_as::<_, RecurringTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all templates, oldest first.
    ///
    /// No date filter: deciding which templates are due is the cadence
    /// evaluator's job, not the query's.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<RecurringTemplate>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM recurring_task_templates ORDER BY created_at ASC");
        sqlx::query_as::<_, RecurringTemplate>(&query)
            .fetch_all(pool)
            .await
    }

    /// Delete a template by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recurring_task_templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
