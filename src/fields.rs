//! Enumerations and field types for sprint planning.
//!
//! This module defines the closed vocabularies used to categorise tasks and
//! sprints: workflow statuses (the board columns), priority levels, and the
//! sprint lifecycle states.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Workflow status of a task, i.e. the board column it sits in.
///
/// Ordering follows the workflow left to right, so status-keyed maps
/// iterate in board order.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    ToDo,
    InProgress,
    Testing,
    Done,
}

impl Status {
    /// Board columns in workflow order.
    pub const ALL: [Status; 4] = [
        Status::ToDo,
        Status::InProgress,
        Status::Testing,
        Status::Done,
    ];

    /// Column heading for display.
    pub fn label(self) -> &'static str {
        match self {
            Status::ToDo => "To Do",
            Status::InProgress => "In Progress",
            Status::Testing => "Testing",
            Status::Done => "Done",
        }
    }

    /// Short explanation shown in the workflow settings view.
    pub fn description(self) -> &'static str {
        match self {
            Status::ToDo => "Tasks that are ready to be worked on",
            Status::InProgress => "Tasks currently being worked on",
            Status::Testing => "Tasks under review or testing",
            Status::Done => "Completed tasks",
        }
    }

    /// Next column on the board, saturating at Done.
    pub fn next(self) -> Status {
        match self {
            Status::ToDo => Status::InProgress,
            Status::InProgress => Status::Testing,
            Status::Testing => Status::Done,
            Status::Done => Status::Done,
        }
    }

    /// Previous column on the board, saturating at To Do.
    pub fn prev(self) -> Status {
        match self {
            Status::ToDo => Status::ToDo,
            Status::InProgress => Status::ToDo,
            Status::Testing => Status::InProgress,
            Status::Done => Status::Testing,
        }
    }
}

/// Priority classification for task importance.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Priority levels from lowest to highest.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Backlog ordering weight; higher ranks sort first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

/// Lifecycle state of a sprint.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "kebab-case")]
pub enum SprintStatus {
    Planned,
    Active,
    Completed,
}

impl SprintStatus {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            SprintStatus::Planned => "Planned",
            SprintStatus::Active => "Active",
            SprintStatus::Completed => "Completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_order_matches_workflow() {
        assert!(Status::ToDo < Status::InProgress);
        assert!(Status::InProgress < Status::Testing);
        assert!(Status::Testing < Status::Done);
    }

    #[test]
    fn status_next_and_prev_saturate() {
        assert_eq!(Status::Done.next(), Status::Done);
        assert_eq!(Status::ToDo.prev(), Status::ToDo);
        assert_eq!(Status::InProgress.next(), Status::Testing);
        assert_eq!(Status::Testing.prev(), Status::InProgress);
    }

    #[test]
    fn priority_ranks_are_ordered() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }

    #[test]
    fn wire_names_are_kebab_case() {
        assert_eq!(serde_json::to_string(&Status::InProgress).unwrap(), "\"in-progress\"");
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&SprintStatus::Planned).unwrap(), "\"planned\"");
        let s: Status = serde_json::from_str("\"to-do\"").unwrap();
        assert_eq!(s, Status::ToDo);
    }
}
