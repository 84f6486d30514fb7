//! Backlog ordering and sprint planning splits.
//!
//! The backlog lists tasks by urgency: priority first, then recency. The
//! split helpers carve a task list into sprint members and everything else,
//! which is all sprint planning needs since membership lives on the task.

use std::cmp::Reverse;

use crate::task::Task;

/// Order tasks by priority (high first), then by creation time (newest
/// first). The sort is stable, so ties keep their input order and sorting
/// twice changes nothing.
pub fn sort_backlog<'a>(tasks: &[&'a Task]) -> Vec<&'a Task> {
    let mut out: Vec<&Task> = tasks.to_vec();
    out.sort_by_key(|t| (Reverse(t.priority.rank()), Reverse(t.created_at)));
    out
}

/// Split tasks into members of the given sprint and the rest.
pub fn split_by_sprint<'a>(tasks: &[&'a Task], sprint_id: &str) -> (Vec<&'a Task>, Vec<&'a Task>) {
    tasks
        .iter()
        .copied()
        .partition(|t| t.sprint_id.as_deref() == Some(sprint_id))
}

/// Tasks not planned into any sprint: the backlog proper.
pub fn unassigned<'a>(tasks: &[&'a Task]) -> Vec<&'a Task> {
    tasks
        .iter()
        .copied()
        .filter(|t| t.sprint_id.is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::fields::{Priority, Status};

    fn task(id: &str, priority: Priority, day: u32, sprint: Option<&str>) -> Task {
        let created = Utc.with_ymd_and_hms(2026, 8, day, 9, 0, 0).unwrap();
        Task {
            id: id.into(),
            title: format!("Task {id}"),
            description: String::new(),
            status: Status::ToDo,
            priority,
            assignee_id: None,
            project_id: "proj-1".into(),
            sprint_id: sprint.map(String::from),
            comments: Vec::new(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn orders_by_priority_then_recency() {
        let tasks = vec![
            task("task-1", Priority::Low, 10, None),
            task("task-2", Priority::High, 1, None),
            task("task-3", Priority::Medium, 20, None),
            task("task-4", Priority::High, 5, None),
        ];
        let refs: Vec<&Task> = tasks.iter().collect();
        let ids: Vec<&str> = sort_backlog(&refs).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["task-4", "task-2", "task-3", "task-1"]);
    }

    #[test]
    fn sort_is_idempotent_and_keeps_ties_stable() {
        // Same priority, same creation instant: input order must survive.
        let tasks = vec![
            task("task-1", Priority::Medium, 12, None),
            task("task-2", Priority::Medium, 12, None),
            task("task-3", Priority::Medium, 12, None),
        ];
        let refs: Vec<&Task> = tasks.iter().collect();
        let once = sort_backlog(&refs);
        let twice = sort_backlog(&once);

        let ids: Vec<&str> = once.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["task-1", "task-2", "task-3"]);
        assert_eq!(
            once.iter().map(|t| &t.id).collect::<Vec<_>>(),
            twice.iter().map(|t| &t.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn split_separates_members_from_rest() {
        let tasks = vec![
            task("task-1", Priority::Low, 1, Some("sprint-1")),
            task("task-2", Priority::Low, 2, None),
            task("task-3", Priority::Low, 3, Some("sprint-2")),
            task("task-4", Priority::Low, 4, Some("sprint-1")),
        ];
        let refs: Vec<&Task> = tasks.iter().collect();
        let (members, rest) = split_by_sprint(&refs, "sprint-1");

        let member_ids: Vec<&str> = members.iter().map(|t| t.id.as_str()).collect();
        let rest_ids: Vec<&str> = rest.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(member_ids, ["task-1", "task-4"]);
        assert_eq!(rest_ids, ["task-2", "task-3"]);
        assert_eq!(members.len() + rest.len(), tasks.len());
    }

    #[test]
    fn unassigned_keeps_only_sprintless_tasks() {
        let tasks = vec![
            task("task-1", Priority::Low, 1, Some("sprint-1")),
            task("task-2", Priority::Low, 2, None),
        ];
        let refs: Vec<&Task> = tasks.iter().collect();
        let ids: Vec<&str> = unassigned(&refs).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["task-2"]);
    }
}
