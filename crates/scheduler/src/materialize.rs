//! Task materialization: building a concrete task from a due template.

use flowdeck_core::status::TASK_STATUS_TODO;
use flowdeck_core::types::{DbId, Timestamp};
use flowdeck_db::models::{NewTask, RecurringTemplate};

/// A materialized task plus its side output.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterializedTask {
    /// The task to be committed by the orchestrator. Not yet persisted.
    pub task: NewTask,
    /// Assignees that must receive the must-acknowledge claim. Empty unless
    /// the template is mandatory. A side output for the orchestrator, not a
    /// side effect: nothing is flagged here.
    pub mandatory_assignees: Vec<DbId>,
}

/// Build a task from a due template as a value snapshot at firing time.
///
/// Later edits to the template must not retroactively alter the task, so
/// every field is copied by value. The task enters the workflow's starting
/// state, owned by the explicit `system_actor` (there is no implicit global
/// scheduler identity). Pure: persistence is the orchestrator's job.
pub fn materialize(
    template: &RecurringTemplate,
    system_actor: DbId,
    now: Timestamp,
) -> MaterializedTask {
    let task = NewTask {
        template_id: template.id,
        title: template.title.clone(),
        description: template.description.clone(),
        brand_id: template.brand_id,
        priority: template.priority.clone(),
        assignee_ids: template.assignee_ids.clone(),
        company_id: template.company_id,
        status: TASK_STATUS_TODO.to_string(),
        created_by: system_actor,
        start_date: now,
    };

    let mandatory_assignees = if template.is_mandatory {
        template.assignee_ids.clone()
    } else {
        Vec::new()
    };

    MaterializedTask {
        task,
        mandatory_assignees,
    }
}
