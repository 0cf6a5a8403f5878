//! Task model and the materialized-task DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use flowdeck_core::types::{DbId, Timestamp};

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub template_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub brand_id: Option<DbId>,
    pub priority: String,
    pub assignee_ids: Vec<DbId>,
    pub company_id: DbId,
    pub status: String,
    pub created_by: DbId,
    pub start_date: Timestamp,
    pub created_at: Timestamp,
}

/// A task materialized from a due template, not yet persisted.
///
/// Fields are a value snapshot of the template at firing time: later edits
/// to the template must not alter tasks that were already created from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    /// Template whose watermark must advance in the same transaction that
    /// inserts this task.
    pub template_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub brand_id: Option<DbId>,
    pub priority: String,
    pub assignee_ids: Vec<DbId>,
    pub company_id: DbId,
    pub status: String,
    pub created_by: DbId,
    pub start_date: Timestamp,
}
