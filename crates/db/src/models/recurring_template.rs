//! Recurring task template model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use flowdeck_core::error::CoreError;
use flowdeck_core::recurrence::Cadence;
use flowdeck_core::types::{DbId, Timestamp};

/// A row from the `recurring_task_templates` table.
///
/// Immutable from the scheduler's perspective except for
/// `last_generated_at`, the per-template firing watermark.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecurringTemplate {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub frequency: String,
    pub days_of_week: Vec<String>,
    pub day_of_month: Option<i32>,
    pub assignee_ids: Vec<DbId>,
    pub brand_id: Option<DbId>,
    pub priority: String,
    pub is_mandatory: bool,
    pub company_id: DbId,
    pub last_generated_at: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RecurringTemplate {
    /// Parse this template's stored cadence fields into a [`Cadence`].
    ///
    /// Fails with a configuration error for unknown frequencies or
    /// malformed weekday/day-of-month values; callers skip such templates
    /// with a warning rather than failing the run.
    pub fn cadence(&self) -> Result<Cadence, CoreError> {
        Cadence::from_fields(&self.frequency, &self.days_of_week, self.day_of_month)
    }
}

/// DTO for creating a new template (UI flows and test fixtures).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecurringTemplate {
    pub title: String,
    pub description: Option<String>,
    pub frequency: String,
    #[serde(default)]
    pub days_of_week: Vec<String>,
    pub day_of_month: Option<i32>,
    #[serde(default)]
    pub assignee_ids: Vec<DbId>,
    pub brand_id: Option<DbId>,
    pub priority: Option<String>,
    #[serde(default)]
    pub is_mandatory: bool,
    pub company_id: DbId,
}
