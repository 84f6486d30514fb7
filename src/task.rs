//! Task data structures and related input types.
//!
//! This module defines the core `Task` struct that represents a single work
//! item on the board, the `Comment` records embedded in it, and the input
//! types the store accepts for creation and partial updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::*;

/// A work item on the board.
///
/// Sprint membership lives here and only here: a task belongs to the sprint
/// named by `sprint_id`, and the backlog is exactly the tasks where it is
/// `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub assignee_id: Option<String>,
    pub project_id: String,
    pub sprint_id: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment on a task, ordered oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a task; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub assignee_id: Option<String>,
    pub project_id: String,
    pub sprint_id: Option<String>,
}

/// Partial update for a task. Unset fields leave the record untouched.
///
/// For the nullable references the outer `Option` means "change this field"
/// and the inner one carries the new value, so `Some(None)` clears the
/// assignee or sprint while `None` leaves it alone.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assignee_id: Option<Option<String>>,
    pub sprint_id: Option<Option<String>>,
    pub comments: Option<Vec<Comment>>,
}
