//! Integration tests for the scheduler's storage operations against a real
//! database:
//! - Template CRUD and listing
//! - The atomic run commit: task insert and watermark advance land together
//! - The conditional watermark write skipping already-generated templates
//! - Scheduled-post promotion: due-set query, single promotion, idempotence

use chrono::{NaiveDate, TimeZone, Utc};
use sqlx::PgPool;

use flowdeck_core::status::{POST_STATUS_POSTED, POST_STATUS_SCHEDULED};
use flowdeck_core::types::{DbId, Timestamp};
use flowdeck_db::models::{CreateRecurringTemplate, CreateScheduledPost, NewTask};
use flowdeck_db::repositories::{RecurringTemplateRepo, ScheduledPostRepo, TaskRepo};

const SYSTEM_ACTOR: DbId = 1000;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// 2025-03-10 09:00 UTC, a Monday. Whole seconds so timestamps round-trip
/// exactly through timestamptz.
fn monday_morning() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

fn new_template(title: &str) -> CreateRecurringTemplate {
    CreateRecurringTemplate {
        title: title.to_string(),
        description: Some("storage test".to_string()),
        frequency: "daily".to_string(),
        days_of_week: Vec::new(),
        day_of_month: None,
        assignee_ids: vec![21, 34],
        brand_id: Some(3),
        priority: Some("high".to_string()),
        is_mandatory: false,
        company_id: 1,
    }
}

fn new_post(title: &str, status: &str, scheduled_at: Option<Timestamp>) -> CreateScheduledPost {
    CreateScheduledPost {
        title: title.to_string(),
        brand_id: Some(3),
        company_id: 1,
        status: Some(status.to_string()),
        scheduled_at,
    }
}

/// Build the task a firing of `template_id` would materialize.
fn task_for(template_id: DbId, title: &str) -> NewTask {
    NewTask {
        template_id,
        title: title.to_string(),
        description: None,
        brand_id: Some(3),
        priority: "high".to_string(),
        assignee_ids: vec![21, 34],
        company_id: 1,
        status: "todo".to_string(),
        created_by: SYSTEM_ACTOR,
        start_date: monday_morning(),
    }
}

// ---------------------------------------------------------------------------
// Template CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn template_create_find_and_delete(pool: PgPool) {
    let created = RecurringTemplateRepo::create(&pool, &new_template("Daily standup notes"))
        .await
        .unwrap();

    let found = RecurringTemplateRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("created template should be findable");

    assert_eq!(found.title, "Daily standup notes");
    assert_eq!(found.frequency, "daily");
    assert_eq!(found.assignee_ids, vec![21, 34]);
    assert_eq!(found.priority, "high");
    assert!(!found.is_mandatory);
    // A fresh template has never fired.
    assert_eq!(found.last_generated_at, None);

    let deleted = RecurringTemplateRepo::delete(&pool, created.id).await.unwrap();
    assert!(deleted, "delete should return true on first call");

    assert!(RecurringTemplateRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());

    let deleted_again = RecurringTemplateRepo::delete(&pool, created.id).await.unwrap();
    assert!(!deleted_again, "second delete should report no row removed");
}

#[sqlx::test(migrations = "./migrations")]
async fn template_priority_defaults_when_omitted(pool: PgPool) {
    let mut input = new_template("Untouched priority");
    input.priority = None;

    let created = RecurringTemplateRepo::create(&pool, &input).await.unwrap();
    assert_eq!(created.priority, "medium");
}

#[sqlx::test(migrations = "./migrations")]
async fn list_all_returns_every_template(pool: PgPool) {
    let a = RecurringTemplateRepo::create(&pool, &new_template("First"))
        .await
        .unwrap();
    let b = RecurringTemplateRepo::create(&pool, &new_template("Second"))
        .await
        .unwrap();

    let all = RecurringTemplateRepo::list_all(&pool).await.unwrap();
    let ids: Vec<DbId> = all.iter().map(|t| t.id).collect();

    assert_eq!(all.len(), 2);
    assert!(ids.contains(&a.id));
    assert!(ids.contains(&b.id));
}

// ---------------------------------------------------------------------------
// Atomic run commit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn commit_run_inserts_task_and_advances_watermark_together(pool: PgPool) {
    let template = RecurringTemplateRepo::create(&pool, &new_template("Weekly recap"))
        .await
        .unwrap();

    let commit = TaskRepo::commit_run(&pool, &[task_for(template.id, "Weekly recap")], monday())
        .await
        .unwrap();
    assert_eq!(commit.tasks_created, 1);
    assert_eq!(commit.templates_skipped, 0);

    // The watermark and the task landed in the same transaction.
    let template = RecurringTemplateRepo::find_by_id(&pool, template.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(template.last_generated_at, Some(monday()));

    let tasks = TaskRepo::list_by_template(&pool, template.id).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Weekly recap");
    assert_eq!(tasks[0].status, "todo");
    assert_eq!(tasks[0].created_by, SYSTEM_ACTOR);
    assert_eq!(tasks[0].assignee_ids, vec![21, 34]);
    assert_eq!(tasks[0].start_date, monday_morning());
    assert_eq!(tasks[0].template_id, Some(template.id));

    let by_id = TaskRepo::find_by_id(&pool, tasks[0].id).await.unwrap().unwrap();
    assert_eq!(by_id.id, tasks[0].id);
}

#[sqlx::test(migrations = "./migrations")]
async fn commit_run_skips_template_already_generated_that_day(pool: PgPool) {
    let template = RecurringTemplateRepo::create(&pool, &new_template("Daily digest"))
        .await
        .unwrap();
    let tasks = [task_for(template.id, "Daily digest")];

    let first = TaskRepo::commit_run(&pool, &tasks, monday()).await.unwrap();
    assert_eq!(first.tasks_created, 1);

    // Same-day re-commit: the conditional watermark write refuses, and no
    // duplicate task appears.
    let second = TaskRepo::commit_run(&pool, &tasks, monday()).await.unwrap();
    assert_eq!(second.tasks_created, 0);
    assert_eq!(second.templates_skipped, 1);
    assert_eq!(TaskRepo::count_by_template(&pool, template.id).await.unwrap(), 1);

    // The next day fires normally.
    let tuesday = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
    let third = TaskRepo::commit_run(&pool, &tasks, tuesday).await.unwrap();
    assert_eq!(third.tasks_created, 1);
    assert_eq!(TaskRepo::count_by_template(&pool, template.id).await.unwrap(), 2);

    let template = RecurringTemplateRepo::find_by_id(&pool, template.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(template.last_generated_at, Some(tuesday));
}

#[sqlx::test(migrations = "./migrations")]
async fn commit_run_mixed_batch_commits_fresh_and_skips_stale(pool: PgPool) {
    let fresh = RecurringTemplateRepo::create(&pool, &new_template("Fresh"))
        .await
        .unwrap();
    let stale = RecurringTemplateRepo::create(&pool, &new_template("Stale"))
        .await
        .unwrap();

    // An earlier (overlapping) invocation already fired the stale template.
    TaskRepo::commit_run(&pool, &[task_for(stale.id, "Stale")], monday())
        .await
        .unwrap();

    let commit = TaskRepo::commit_run(
        &pool,
        &[task_for(fresh.id, "Fresh"), task_for(stale.id, "Stale")],
        monday(),
    )
    .await
    .unwrap();

    // The fresh half of the batch lands; the stale half leaves neither a
    // task nor a watermark change behind.
    assert_eq!(commit.tasks_created, 1);
    assert_eq!(commit.templates_skipped, 1);
    assert_eq!(TaskRepo::count_by_template(&pool, fresh.id).await.unwrap(), 1);
    assert_eq!(TaskRepo::count_by_template(&pool, stale.id).await.unwrap(), 1);

    let stale = RecurringTemplateRepo::find_by_id(&pool, stale.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stale.last_generated_at, Some(monday()));
}

#[sqlx::test(migrations = "./migrations")]
async fn commit_run_with_no_tasks_is_a_no_op(pool: PgPool) {
    let commit = TaskRepo::commit_run(&pool, &[], monday()).await.unwrap();
    assert_eq!(commit.tasks_created, 0);
    assert_eq!(commit.templates_skipped, 0);
}

// ---------------------------------------------------------------------------
// Scheduled-post promotion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn publish_due_promotes_only_due_scheduled_posts(pool: PgPool) {
    let now = monday_morning();
    let yesterday = Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap();
    let tomorrow = Utc.with_ymd_and_hms(2025, 3, 11, 12, 0, 0).unwrap();

    let due = ScheduledPostRepo::create(
        &pool,
        &new_post("Due", POST_STATUS_SCHEDULED, Some(yesterday)),
    )
    .await
    .unwrap();
    let future = ScheduledPostRepo::create(
        &pool,
        &new_post("Future", POST_STATUS_SCHEDULED, Some(tomorrow)),
    )
    .await
    .unwrap();
    let draft = ScheduledPostRepo::create(&pool, &new_post("Draft", "draft", Some(yesterday)))
        .await
        .unwrap();

    // Only the due post is in the due-set.
    let due_set = ScheduledPostRepo::list_due(&pool, now).await.unwrap();
    assert_eq!(due_set.len(), 1);
    assert_eq!(due_set[0].id, due.id);

    let published = ScheduledPostRepo::publish_due(&pool, now).await.unwrap();
    assert_eq!(published, 1);

    let due = ScheduledPostRepo::find_by_id(&pool, due.id).await.unwrap().unwrap();
    assert_eq!(due.status, POST_STATUS_POSTED);
    assert_eq!(due.posted_at, Some(now));

    let future = ScheduledPostRepo::find_by_id(&pool, future.id).await.unwrap().unwrap();
    assert_eq!(future.status, POST_STATUS_SCHEDULED);
    assert_eq!(future.posted_at, None);

    let draft = ScheduledPostRepo::find_by_id(&pool, draft.id).await.unwrap().unwrap();
    assert_eq!(draft.status, "draft");
    assert_eq!(draft.posted_at, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn publish_due_is_idempotent(pool: PgPool) {
    let now = monday_morning();
    let yesterday = Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap();
    let post = ScheduledPostRepo::create(
        &pool,
        &new_post("Once only", POST_STATUS_SCHEDULED, Some(yesterday)),
    )
    .await
    .unwrap();

    assert_eq!(ScheduledPostRepo::publish_due(&pool, now).await.unwrap(), 1);

    // A later run finds nothing: a posted post never matches the due-set
    // again, and its posted_at keeps the original promotion time.
    let later = Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap();
    assert_eq!(ScheduledPostRepo::publish_due(&pool, later).await.unwrap(), 0);
    assert!(ScheduledPostRepo::list_due(&pool, later).await.unwrap().is_empty());

    let post = ScheduledPostRepo::find_by_id(&pool, post.id).await.unwrap().unwrap();
    assert_eq!(post.status, POST_STATUS_POSTED);
    assert_eq!(post.posted_at, Some(now));
}
