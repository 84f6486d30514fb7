//! Board grouping.
//!
//! Turns a flat task list into the four kanban columns. Every column is
//! always present, even when empty, so the board renders a stable layout
//! and the columns together partition the input exactly.

use std::collections::BTreeMap;

use crate::fields::Status;
use crate::task::Task;

/// Group tasks into board columns keyed by status.
///
/// All four statuses appear as keys regardless of whether any task holds
/// them; within a column, input order is preserved.
pub fn group_by_status<'a>(tasks: &[&'a Task]) -> BTreeMap<Status, Vec<&'a Task>> {
    let mut columns: BTreeMap<Status, Vec<&Task>> = BTreeMap::new();
    for status in Status::ALL {
        columns.insert(status, Vec::new());
    }
    for task in tasks {
        columns.entry(task.status).or_default().push(task);
    }
    columns
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::fields::Priority;

    fn task(id: &str, status: Status) -> Task {
        let now = Utc::now();
        Task {
            id: id.into(),
            title: format!("Task {id}"),
            description: String::new(),
            status,
            priority: Priority::Medium,
            assignee_id: None,
            project_id: "proj-1".into(),
            sprint_id: None,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn all_columns_present_even_when_empty() {
        let columns = group_by_status(&[]);
        assert_eq!(columns.len(), 4);
        for status in Status::ALL {
            assert!(columns[&status].is_empty());
        }
    }

    #[test]
    fn columns_partition_the_input() {
        let tasks = vec![
            task("task-1", Status::ToDo),
            task("task-2", Status::Done),
            task("task-3", Status::ToDo),
            task("task-4", Status::InProgress),
        ];
        let refs: Vec<&Task> = tasks.iter().collect();
        let columns = group_by_status(&refs);

        let total: usize = columns.values().map(Vec::len).sum();
        assert_eq!(total, tasks.len());

        let todo: Vec<&str> = columns[&Status::ToDo].iter().map(|t| t.id.as_str()).collect();
        assert_eq!(todo, ["task-1", "task-3"]);
        assert!(columns[&Status::Testing].is_empty());
    }

    #[test]
    fn keys_iterate_in_workflow_order() {
        let tasks = vec![task("task-1", Status::Done)];
        let refs: Vec<&Task> = tasks.iter().collect();
        let order: Vec<Status> = group_by_status(&refs).into_keys().collect();
        assert_eq!(order, Status::ALL);
    }
}
