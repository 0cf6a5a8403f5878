//! Scheduled social post model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use flowdeck_core::types::{DbId, Timestamp};

/// A row from the `scheduled_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScheduledPost {
    pub id: DbId,
    pub title: String,
    pub brand_id: Option<DbId>,
    pub company_id: DbId,
    pub status: String,
    pub scheduled_at: Option<Timestamp>,
    pub posted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a scheduled post (UI flows and test fixtures).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScheduledPost {
    pub title: String,
    pub brand_id: Option<DbId>,
    pub company_id: DbId,
    pub status: Option<String>,
    pub scheduled_at: Option<Timestamp>,
}
