//! Sprint data structures and input types.
//!
//! A sprint is a dated iteration within a project. Sprints do not track
//! their member tasks; membership is derived from `Task::sprint_id` so the
//! two can never disagree.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::SprintStatus;

/// A dated iteration of work within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprint {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: SprintStatus,
    pub project_id: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a sprint; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewSprint {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: SprintStatus,
    pub project_id: String,
}

/// Partial update for a sprint. Unset fields leave the record untouched.
#[derive(Debug, Clone, Default)]
pub struct SprintPatch {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<SprintStatus>,
}
