//! Task filtering.
//!
//! A `TaskFilter` holds up to four optional criteria; a task passes when it
//! matches every criterion that is set. Filtering never reorders tasks, so
//! the board and backlog keep their ordering guarantees under any filter.

use crate::fields::{Priority, Status};
use crate::task::Task;

/// Optional criteria combined with AND semantics.
///
/// `None` axes match everything, so the default filter passes every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Match tasks assigned to this user id.
    pub assignee: Option<String>,
    /// Match tasks at this priority.
    pub priority: Option<Priority>,
    /// Match tasks in this board column.
    pub status: Option<Status>,
    /// Match tasks planned into this sprint id.
    pub sprint: Option<String>,
}

impl TaskFilter {
    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.assignee.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.sprint.is_none()
    }

    /// Does this task pass every active criterion?
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(assignee) = &self.assignee {
            if task.assignee_id.as_deref() != Some(assignee.as_str()) {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(sprint) = &self.sprint {
            if task.sprint_id.as_deref() != Some(sprint.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Tasks passing the filter, in their original order.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn task(id: &str, assignee: Option<&str>, priority: Priority, status: Status, sprint: Option<&str>) -> Task {
        let now = Utc::now();
        Task {
            id: id.into(),
            title: format!("Task {id}"),
            description: String::new(),
            status,
            priority,
            assignee_id: assignee.map(String::from),
            project_id: "proj-1".into(),
            sprint_id: sprint.map(String::from),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task("task-1", Some("user-1"), Priority::High, Status::ToDo, Some("sprint-1")),
            task("task-2", Some("user-2"), Priority::Low, Status::InProgress, Some("sprint-1")),
            task("task-3", None, Priority::High, Status::Done, None),
            task("task-4", Some("user-1"), Priority::Medium, Status::ToDo, None),
        ]
    }

    #[test]
    fn empty_filter_passes_everything_in_order() {
        let tasks = sample();
        let filter = TaskFilter::default();
        assert!(filter.is_empty());

        let out = filter_tasks(&tasks, &filter);
        let ids: Vec<&str> = out.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["task-1", "task-2", "task-3", "task-4"]);
    }

    #[test]
    fn criteria_combine_with_and() {
        let tasks = sample();
        let filter = TaskFilter {
            assignee: Some("user-1".into()),
            status: Some(Status::ToDo),
            ..Default::default()
        };
        let ids: Vec<&str> = filter_tasks(&tasks, &filter).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["task-1", "task-4"]);

        let narrowed = TaskFilter {
            assignee: Some("user-1".into()),
            status: Some(Status::ToDo),
            priority: Some(Priority::High),
            ..Default::default()
        };
        let ids: Vec<&str> = filter_tasks(&tasks, &narrowed).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["task-1"]);
    }

    #[test]
    fn sprint_axis_never_matches_unplanned_tasks() {
        let tasks = sample();
        let filter = TaskFilter { sprint: Some("sprint-1".into()), ..Default::default() };
        let ids: Vec<&str> = filter_tasks(&tasks, &filter).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["task-1", "task-2"]);
    }

    #[test]
    fn unknown_values_match_nothing() {
        let tasks = sample();
        let filter = TaskFilter { assignee: Some("user-99".into()), ..Default::default() };
        assert!(filter_tasks(&tasks, &filter).is_empty());
    }

    #[test]
    fn output_is_a_subsequence_of_input() {
        let tasks = sample();
        let filter = TaskFilter { priority: Some(Priority::High), ..Default::default() };
        let out = filter_tasks(&tasks, &filter);

        let mut cursor = tasks.iter();
        for picked in out {
            assert!(cursor.any(|t| t.id == picked.id));
        }
    }
}
