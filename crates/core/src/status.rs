//! Status vocabularies for tasks and scheduled posts.
//!
//! Statuses are stored as lowercase strings in the database. The scheduler
//! only ever writes the task workflow's starting state and the
//! `scheduled -> posted` post transition; all other transitions belong to
//! the UI-driven flows.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Task workflow
// ---------------------------------------------------------------------------

/// The task workflow's starting state. Materialized tasks begin here.
pub const TASK_STATUS_TODO: &str = "todo";

pub const TASK_STATUS_IN_PROGRESS: &str = "in_progress";
pub const TASK_STATUS_IN_REVIEW: &str = "in_review";
pub const TASK_STATUS_DONE: &str = "done";

/// All valid task workflow states.
pub const VALID_TASK_STATUSES: &[&str] = &[
    TASK_STATUS_TODO,
    TASK_STATUS_IN_PROGRESS,
    TASK_STATUS_IN_REVIEW,
    TASK_STATUS_DONE,
];

// ---------------------------------------------------------------------------
// Scheduled posts
// ---------------------------------------------------------------------------

pub const POST_STATUS_DRAFT: &str = "draft";
pub const POST_STATUS_NEEDS_APPROVAL: &str = "needs_approval";
pub const POST_STATUS_SCHEDULED: &str = "scheduled";
pub const POST_STATUS_POSTED: &str = "posted";
pub const POST_STATUS_ERROR: &str = "error";

/// All valid scheduled-post statuses.
pub const VALID_POST_STATUSES: &[&str] = &[
    POST_STATUS_DRAFT,
    POST_STATUS_NEEDS_APPROVAL,
    POST_STATUS_SCHEDULED,
    POST_STATUS_POSTED,
    POST_STATUS_ERROR,
];

/// Lifecycle state of a scheduled social post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    NeedsApproval,
    Scheduled,
    Posted,
    Error,
}

impl PostStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            POST_STATUS_DRAFT => Ok(Self::Draft),
            POST_STATUS_NEEDS_APPROVAL => Ok(Self::NeedsApproval),
            POST_STATUS_SCHEDULED => Ok(Self::Scheduled),
            POST_STATUS_POSTED => Ok(Self::Posted),
            POST_STATUS_ERROR => Ok(Self::Error),
            _ => Err(format!(
                "Invalid post status '{s}'. Must be one of: {}",
                VALID_POST_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => POST_STATUS_DRAFT,
            Self::NeedsApproval => POST_STATUS_NEEDS_APPROVAL,
            Self::Scheduled => POST_STATUS_SCHEDULED,
            Self::Posted => POST_STATUS_POSTED,
            Self::Error => POST_STATUS_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_status_from_str_scheduled() {
        assert_eq!(
            PostStatus::from_str_value("scheduled").unwrap(),
            PostStatus::Scheduled
        );
    }

    #[test]
    fn post_status_from_str_invalid() {
        let result = PostStatus::from_str_value("published");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid post status"));
    }

    #[test]
    fn post_status_as_str_round_trip() {
        for status in &[
            PostStatus::Draft,
            PostStatus::NeedsApproval,
            PostStatus::Scheduled,
            PostStatus::Posted,
            PostStatus::Error,
        ] {
            assert_eq!(
                PostStatus::from_str_value(status.as_str()).unwrap(),
                *status
            );
        }
    }

    #[test]
    fn task_starting_state_is_valid() {
        assert!(VALID_TASK_STATUSES.contains(&TASK_STATUS_TODO));
    }
}
