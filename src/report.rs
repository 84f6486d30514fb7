//! Report aggregates.
//!
//! Chart-ready numbers derived from task and sprint snapshots: progress
//! percentages, status and priority distributions, and the headline stats
//! on the reports page. Distributions are always zero-filled so charts get
//! every label even when a bucket is empty.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::fields::{Priority, SprintStatus, Status};
use crate::sprint::Sprint;
use crate::task::Task;

/// Progress of a single sprint as a whole percentage.
///
/// `round(100 × done / members)`; a sprint with no members is 0% done.
pub fn sprint_progress(tasks: &[&Task], sprint_id: &str) -> u8 {
    let members: Vec<&&Task> = tasks
        .iter()
        .filter(|t| t.sprint_id.as_deref() == Some(sprint_id))
        .collect();
    if members.is_empty() {
        return 0;
    }
    let done = members.iter().filter(|t| t.status == Status::Done).count();
    ((done as f64 / members.len() as f64) * 100.0).round() as u8
}

/// Task counts per board column, zero-filled over all four statuses.
pub fn status_distribution(tasks: &[&Task]) -> BTreeMap<Status, usize> {
    let mut counts: BTreeMap<Status, usize> = Status::ALL.into_iter().map(|s| (s, 0)).collect();
    for task in tasks {
        *counts.entry(task.status).or_default() += 1;
    }
    counts
}

/// Task counts per priority, zero-filled over all three priorities.
pub fn priority_distribution(tasks: &[&Task]) -> BTreeMap<Priority, usize> {
    let mut counts: BTreeMap<Priority, usize> = Priority::ALL.into_iter().map(|p| (p, 0)).collect();
    for task in tasks {
        *counts.entry(task.priority).or_default() += 1;
    }
    counts
}

/// Whole days until `end`, clamped at zero once the date has passed.
pub fn days_remaining(end: NaiveDate, today: NaiveDate) -> i64 {
    (end - today).num_days().max(0)
}

/// One row of the per-sprint progress chart.
#[derive(Debug, Clone, Copy)]
pub struct SprintProgress<'a> {
    pub sprint: &'a Sprint,
    pub total: usize,
    pub done: usize,
    pub percent: u8,
}

/// Per-sprint progress rows, in the order the sprints were given.
pub fn sprint_overview<'a>(tasks: &[&Task], sprints: &'a [Sprint]) -> Vec<SprintProgress<'a>> {
    sprints
        .iter()
        .map(|sprint| {
            let total = tasks
                .iter()
                .filter(|t| t.sprint_id.as_deref() == Some(sprint.id.as_str()))
                .count();
            let done = tasks
                .iter()
                .filter(|t| {
                    t.sprint_id.as_deref() == Some(sprint.id.as_str()) && t.status == Status::Done
                })
                .count();
            SprintProgress {
                sprint,
                total,
                done,
                percent: sprint_progress(tasks, &sprint.id),
            }
        })
        .collect()
}

/// Headline stats for the reports page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total_tasks: usize,
    pub done_tasks: usize,
    pub in_progress_tasks: usize,
    pub active_sprints: usize,
}

/// Compute the headline stats from full snapshots.
pub fn summary(tasks: &[&Task], sprints: &[Sprint]) -> Summary {
    Summary {
        total_tasks: tasks.len(),
        done_tasks: tasks.iter().filter(|t| t.status == Status::Done).count(),
        in_progress_tasks: tasks
            .iter()
            .filter(|t| t.status == Status::InProgress)
            .count(),
        active_sprints: sprints
            .iter()
            .filter(|s| s.status == SprintStatus::Active)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn task(id: &str, status: Status, priority: Priority, sprint: Option<&str>) -> Task {
        let now = Utc::now();
        Task {
            id: id.into(),
            title: format!("Task {id}"),
            description: String::new(),
            status,
            priority,
            assignee_id: None,
            project_id: "proj-1".into(),
            sprint_id: sprint.map(String::from),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sprint(id: &str, status: SprintStatus) -> Sprint {
        Sprint {
            id: id.into(),
            name: format!("Sprint {id}"),
            start_date: "2026-08-17".parse().unwrap(),
            end_date: "2026-08-28".parse().unwrap(),
            status,
            project_id: "proj-1".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn half_done_sprint_is_fifty_percent() {
        let tasks = vec![
            task("task-1", Status::Done, Priority::Medium, Some("sprint-1")),
            task("task-2", Status::Done, Priority::Medium, Some("sprint-1")),
            task("task-3", Status::ToDo, Priority::Medium, Some("sprint-1")),
            task("task-4", Status::InProgress, Priority::Medium, Some("sprint-1")),
            task("task-5", Status::Done, Priority::Medium, None),
        ];
        let refs: Vec<&Task> = tasks.iter().collect();
        assert_eq!(sprint_progress(&refs, "sprint-1"), 50);
    }

    #[test]
    fn empty_sprint_is_zero_percent() {
        let tasks = vec![task("task-1", Status::Done, Priority::Low, None)];
        let refs: Vec<&Task> = tasks.iter().collect();
        assert_eq!(sprint_progress(&refs, "sprint-9"), 0);
    }

    #[test]
    fn progress_rounds_to_nearest_percent() {
        let tasks = vec![
            task("task-1", Status::Done, Priority::Medium, Some("sprint-1")),
            task("task-2", Status::ToDo, Priority::Medium, Some("sprint-1")),
            task("task-3", Status::ToDo, Priority::Medium, Some("sprint-1")),
        ];
        let refs: Vec<&Task> = tasks.iter().collect();
        assert_eq!(sprint_progress(&refs, "sprint-1"), 33);
    }

    #[test]
    fn distributions_are_zero_filled_and_sum_to_input() {
        let tasks = vec![
            task("task-1", Status::ToDo, Priority::High, None),
            task("task-2", Status::ToDo, Priority::Low, None),
            task("task-3", Status::Done, Priority::High, None),
        ];
        let refs: Vec<&Task> = tasks.iter().collect();

        let by_status = status_distribution(&refs);
        assert_eq!(by_status.len(), 4);
        assert_eq!(by_status[&Status::ToDo], 2);
        assert_eq!(by_status[&Status::InProgress], 0);
        assert_eq!(by_status[&Status::Testing], 0);
        assert_eq!(by_status[&Status::Done], 1);
        assert_eq!(by_status.values().sum::<usize>(), tasks.len());

        let by_priority = priority_distribution(&refs);
        assert_eq!(by_priority.len(), 3);
        assert_eq!(by_priority[&Priority::High], 2);
        assert_eq!(by_priority[&Priority::Medium], 0);
        assert_eq!(by_priority[&Priority::Low], 1);
        assert_eq!(by_priority.values().sum::<usize>(), tasks.len());
    }

    #[test]
    fn days_remaining_clamps_at_zero() {
        let end: NaiveDate = "2026-08-28".parse().unwrap();
        assert_eq!(days_remaining(end, "2026-08-25".parse().unwrap()), 3);
        assert_eq!(days_remaining(end, "2026-08-28".parse().unwrap()), 0);
        assert_eq!(days_remaining(end, "2026-09-10".parse().unwrap()), 0);
    }

    #[test]
    fn overview_keeps_sprint_order_and_counts_members() {
        let sprints = vec![
            sprint("sprint-1", SprintStatus::Completed),
            sprint("sprint-2", SprintStatus::Active),
        ];
        let tasks = vec![
            task("task-1", Status::Done, Priority::Medium, Some("sprint-1")),
            task("task-2", Status::ToDo, Priority::Medium, Some("sprint-2")),
            task("task-3", Status::Done, Priority::Medium, Some("sprint-2")),
        ];
        let refs: Vec<&Task> = tasks.iter().collect();
        let rows = sprint_overview(&refs, &sprints);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sprint.id, "sprint-1");
        assert_eq!((rows[0].total, rows[0].done, rows[0].percent), (1, 1, 100));
        assert_eq!(rows[1].sprint.id, "sprint-2");
        assert_eq!((rows[1].total, rows[1].done, rows[1].percent), (2, 1, 50));
    }

    #[test]
    fn summary_counts_tasks_and_active_sprints() {
        let sprints = vec![
            sprint("sprint-1", SprintStatus::Completed),
            sprint("sprint-2", SprintStatus::Active),
        ];
        let tasks = vec![
            task("task-1", Status::Done, Priority::Medium, None),
            task("task-2", Status::InProgress, Priority::Medium, None),
            task("task-3", Status::InProgress, Priority::Medium, None),
            task("task-4", Status::ToDo, Priority::Medium, None),
        ];
        let refs: Vec<&Task> = tasks.iter().collect();
        assert_eq!(
            summary(&refs, &sprints),
            Summary {
                total_tasks: 4,
                done_tasks: 1,
                in_progress_tasks: 2,
                active_sprints: 1,
            }
        );
    }
}
