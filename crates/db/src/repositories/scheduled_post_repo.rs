//! Repository for the `scheduled_posts` table.

use sqlx::PgPool;

use flowdeck_core::status::PostStatus;
use flowdeck_core::types::{DbId, Timestamp};

use crate::models::scheduled_post::{CreateScheduledPost, ScheduledPost};

const COLUMNS: &str = "id, title, brand_id, company_id, status, scheduled_at, \
     posted_at, created_at, updated_at";

/// Provides access to scheduled social posts.
pub struct ScheduledPostRepo;

impl ScheduledPostRepo {
    /// Insert a new scheduled post, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateScheduledPost,
    ) -> Result<ScheduledPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO scheduled_posts (title, brand_id, company_id, status, scheduled_at) \
             VALUES ($1, $2, $3, COALESCE($4, 'draft'), $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScheduledPost>(&query)
            .bind(&input.title)
            .bind(input.brand_id)
            .bind(input.company_id)
            .bind(&input.status)
            .bind(input.scheduled_at)
            .fetch_one(pool)
            .await
    }

    /// Find a post by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ScheduledPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scheduled_posts WHERE id = $1");
        sqlx::query_as::<_, ScheduledPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List posts that are scheduled and whose scheduled time has passed.
    pub async fn list_due(pool: &PgPool, now: Timestamp) -> Result<Vec<ScheduledPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scheduled_posts \
             WHERE status = $1 AND scheduled_at IS NOT NULL AND scheduled_at <= $2 \
             ORDER BY scheduled_at ASC"
        );
        sqlx::query_as::<_, ScheduledPost>(&query)
            .bind(PostStatus::Scheduled.as_str())
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Promote every due post to `posted`, stamping `posted_at = now`.
    ///
    /// A single UPDATE makes the batch atomic, and the status predicate
    /// makes it idempotent: once a post is posted it no longer matches, so
    /// repeat invocations cannot double-publish. Returns the number of
    /// posts promoted.
    pub async fn publish_due(pool: &PgPool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE scheduled_posts \
             SET status = $1, posted_at = $2, updated_at = now() \
             WHERE status = $3 AND scheduled_at IS NOT NULL AND scheduled_at <= $2",
        )
        .bind(PostStatus::Posted.as_str())
        .bind(now)
        .bind(PostStatus::Scheduled.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
