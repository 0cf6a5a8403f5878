//! One-shot scheduler orchestration.
//!
//! [`SchedulerRunner::run`] executes the linear pipeline for a single
//! invocation: load templates, evaluate cadences, materialize due tasks,
//! commit tasks plus watermarks atomically, propagate mandatory flags
//! best-effort, and (concurrently) publish due posts. The two sub-pipelines
//! touch disjoint state and fail independently; the returned [`RunReport`]
//! always reflects whatever partial progress was made.

use std::collections::BTreeSet;

use flowdeck_core::types::{DbId, Timestamp};
use flowdeck_db::models::NewTask;

use crate::claims::{ClaimsProvider, FlagPropagator};
use crate::materialize::materialize;
use crate::store::{SchedulerStore, StoreError};

// ---------------------------------------------------------------------------
// RunReport
// ---------------------------------------------------------------------------

/// Summary of one scheduler invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Tasks materialized and committed this run.
    pub tasks_created: u64,
    /// Due templates skipped inside the commit because their watermark had
    /// already been advanced by an overlapping invocation.
    pub templates_skipped: u64,
    /// Users successfully flagged for mandatory acknowledgment.
    pub users_flagged: u64,
    /// Users whose flag propagation failed (logged, never fatal).
    pub flag_failures: u64,
    /// Scheduled posts promoted to posted.
    pub posts_published: u64,
    /// Failure of the template/task pipeline, if any. Nothing was partially
    /// committed; the next invocation can safely retry.
    pub task_pipeline_error: Option<String>,
    /// Failure of the post-publishing pipeline, if any.
    pub publish_error: Option<String>,
}

impl RunReport {
    /// True if either sub-pipeline failed.
    pub fn has_errors(&self) -> bool {
        self.task_pipeline_error.is_some() || self.publish_error.is_some()
    }

    /// True if the run did anything at all.
    pub fn did_work(&self) -> bool {
        self.tasks_created > 0
            || self.templates_skipped > 0
            || self.users_flagged > 0
            || self.flag_failures > 0
            || self.posts_published > 0
    }

    /// Human-readable summary, distinguishing "no due work" from work done.
    pub fn message(&self) -> String {
        if !self.did_work() {
            return "Scheduler run complete: no due work".to_string();
        }

        let mut msg = format!(
            "Scheduler run complete: {} tasks created, {} users flagged, {} posts published",
            self.tasks_created, self.users_flagged, self.posts_published
        );
        if self.templates_skipped > 0 {
            msg.push_str(&format!(
                " ({} templates already generated today)",
                self.templates_skipped
            ));
        }
        if self.flag_failures > 0 {
            msg.push_str(&format!(", {} flag failures", self.flag_failures));
        }
        msg
    }

    /// Combined error string for the HTTP surface, if any pipeline failed.
    pub fn error(&self) -> Option<String> {
        match (&self.task_pipeline_error, &self.publish_error) {
            (None, None) => None,
            (Some(t), None) => Some(t.clone()),
            (None, Some(p)) => Some(p.clone()),
            (Some(t), Some(p)) => Some(format!("{t}; {p}")),
        }
    }
}

// ---------------------------------------------------------------------------
// SchedulerRunner
// ---------------------------------------------------------------------------

/// Drives one scheduler invocation against a store and a claims provider.
pub struct SchedulerRunner<'a, S, C> {
    store: &'a S,
    claims: &'a C,
    system_actor: DbId,
}

/// Counts from the template/task half of the run.
#[derive(Debug, Default)]
struct TaskPipelineOutcome {
    tasks_created: u64,
    templates_skipped: u64,
    users_flagged: u64,
    flag_failures: u64,
}

impl<'a, S, C> SchedulerRunner<'a, S, C>
where
    S: SchedulerStore,
    C: ClaimsProvider,
{
    pub fn new(store: &'a S, claims: &'a C, system_actor: DbId) -> Self {
        Self {
            store,
            claims,
            system_actor,
        }
    }

    /// Execute one invocation at `now`.
    ///
    /// Never returns an error: failures are captured per sub-pipeline in
    /// the report so the caller can surface partial progress.
    pub async fn run(&self, now: Timestamp) -> RunReport {
        let today = now.date_naive();

        let (task_outcome, publish_outcome) = tokio::join!(
            self.run_task_pipeline(now),
            self.store.publish_due_posts(now),
        );

        let mut report = RunReport::default();

        match task_outcome {
            Ok(outcome) => {
                report.tasks_created = outcome.tasks_created;
                report.templates_skipped = outcome.templates_skipped;
                report.users_flagged = outcome.users_flagged;
                report.flag_failures = outcome.flag_failures;
            }
            Err(e) => {
                tracing::error!(error = %e, "Task materialization pipeline failed");
                report.task_pipeline_error = Some(e.to_string());
            }
        }

        match publish_outcome {
            Ok(published) => report.posts_published = published,
            Err(e) => {
                tracing::error!(error = %e, "Post publishing pipeline failed");
                report.publish_error = Some(e.to_string());
            }
        }

        tracing::info!(
            date = %today,
            tasks_created = report.tasks_created,
            users_flagged = report.users_flagged,
            posts_published = report.posts_published,
            "Scheduler run finished"
        );

        report
    }

    /// LOAD_TEMPLATES -> EVALUATE -> MATERIALIZE -> COMMIT -> PROPAGATE_FLAGS.
    async fn run_task_pipeline(&self, now: Timestamp) -> Result<TaskPipelineOutcome, StoreError> {
        let today = now.date_naive();
        let templates = self.store.load_templates().await?;
        tracing::debug!(count = templates.len(), "Loaded recurring templates");

        let mut tasks: Vec<NewTask> = Vec::new();
        let mut to_flag: BTreeSet<DbId> = BTreeSet::new();

        for template in &templates {
            let cadence = match template.cadence() {
                Ok(cadence) => cadence,
                Err(e) => {
                    tracing::warn!(
                        template_id = template.id,
                        error = %e,
                        "Skipping misconfigured template"
                    );
                    continue;
                }
            };

            if !cadence.is_due_on(template.last_generated_at, today) {
                continue;
            }

            let materialized = materialize(template, self.system_actor, now);
            to_flag.extend(materialized.mandatory_assignees);
            tasks.push(materialized.task);
        }

        if tasks.is_empty() {
            return Ok(TaskPipelineOutcome::default());
        }

        // Atomic: all tasks plus all watermark advances, or nothing.
        let commit = self.store.commit_run(&tasks, today).await?;
        tracing::info!(
            tasks_created = commit.tasks_created,
            templates_skipped = commit.templates_skipped,
            "Committed scheduler run"
        );

        // Best-effort, outside the commit: the identity provider is a
        // separate consistency domain from the task store.
        let user_ids: Vec<DbId> = to_flag.into_iter().collect();
        let flags = FlagPropagator::flag_users(self.claims, &user_ids).await;

        Ok(TaskPipelineOutcome {
            tasks_created: commit.tasks_created,
            templates_skipped: commit.templates_skipped,
            users_flagged: flags.succeeded.len() as u64,
            flag_failures: flags.failed.len() as u64,
        })
    }
}
