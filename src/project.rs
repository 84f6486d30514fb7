//! Project and team member records.
//!
//! Projects carry an identifying key and the ordered workflow their boards
//! use; users are the team members tasks can be assigned to. Both are
//! read-only reference data in the settings views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::Status;

/// A project with its key and workflow configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Short code used to prefix ticket references, e.g. "PHX".
    pub key: String,
    pub description: String,
    /// Board columns in order for this project's workflow.
    pub workflow: Vec<Status>,
    pub created_at: DateTime<Utc>,
}

/// A team member tasks can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Uppercase initials for compact display, e.g. "Ana Barrett" -> "AB".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .map(|c| c.to_ascii_uppercase())
            .take(2)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_initials() {
        let user = User {
            id: "user-1".into(),
            name: "Ana Barrett".into(),
            email: "ana@example.com".into(),
            created_at: Utc::now(),
        };
        assert_eq!(user.initials(), "AB");

        let mononym = User {
            id: "user-2".into(),
            name: "Sam".into(),
            email: "sam@example.com".into(),
            created_at: Utc::now(),
        };
        assert_eq!(mononym.initials(), "S");
    }
}
