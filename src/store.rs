//! In-memory data stores simulating a remote backend.
//!
//! Each collection gets its own store with async CRUD operations that sleep
//! for a simulated network delay before touching the data, so the UI layers
//! exercise the same latency handling they would against a real service.
//! The `Stores` aggregate is built once at startup from a JSON seed and
//! passed by reference to everything that needs data.

use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time;
use tracing::{debug, info};

use crate::fields::{SprintStatus, Status};
use crate::project::{Project, User};
use crate::sprint::{NewSprint, Sprint, SprintPatch};
use crate::task::{NewTask, Task, TaskPatch};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Sprint not found
    #[error("sprint not found: {id}")]
    SprintNotFound { id: String },

    /// Project not found
    #[error("project not found: {id}")]
    ProjectNotFound { id: String },

    /// User not found
    #[error("user not found: {id}")]
    UserNotFound { id: String },

    /// Seed file could not be read
    #[error("failed to read seed data: {0}")]
    SeedIo(#[from] std::io::Error),

    /// Seed JSON did not match the expected shape
    #[error("invalid seed data: {0}")]
    SeedParse(#[from] serde_json::Error),
}

// Simulated delays per operation class, in milliseconds. These mirror what
// a small HTTP backend would cost for each operation.
const LIST_MS: u64 = 300;
const GET_MS: u64 = 200;
const CREATE_MS: u64 = 400;
const UPDATE_MS: u64 = 350;
const DELETE_MS: u64 = 300;
const QUERY_MS: u64 = 250;

/// Scale factor applied to the simulated delays.
///
/// 100 behaves like the mock backend, lower values speed everything up
/// proportionally, and 0 disables the delays entirely (tests run at zero).
#[derive(Debug, Clone, Copy)]
pub struct Latency {
    percent: u64,
}

impl Latency {
    /// Latency scaled to the given percentage of the canonical delays.
    pub const fn scaled(percent: u64) -> Self {
        Latency { percent }
    }

    /// No delays at all.
    pub const fn zero() -> Self {
        Latency::scaled(0)
    }

    async fn pause(&self, base_ms: u64) {
        let ms = base_ms * self.percent / 100;
        if ms > 0 {
            time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

/// Generate the next available id for a collection, `prefix` included.
///
/// Ids are of the form `task-7`; the next id is one past the highest
/// numeric suffix present, so deletions never cause reuse of a live id.
fn next_id<'a>(prefix: &str, ids: impl Iterator<Item = &'a str>) -> String {
    let max = ids
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}{}", max + 1)
}

/// Store for the task collection.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Mutex<Vec<Task>>,
    latency: Latency,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>, latency: Latency) -> Self {
        TaskStore {
            tasks: Mutex::new(tasks),
            latency,
        }
    }

    /// Snapshot of every task, newest first.
    pub async fn list(&self) -> Vec<Task> {
        self.latency.pause(LIST_MS).await;
        self.tasks.lock().await.clone()
    }

    /// Fetch a single task by id.
    pub async fn get(&self, id: &str) -> Result<Task> {
        self.latency.pause(GET_MS).await;
        let tasks = self.tasks.lock().await;
        tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| StoreError::TaskNotFound { id: id.to_string() })
    }

    /// Create a task: assigns the next id, stamps timestamps, and prepends
    /// it so newest tasks list first.
    pub async fn create(&self, new: NewTask) -> Task {
        self.latency.pause(CREATE_MS).await;
        let mut tasks = self.tasks.lock().await;
        let now = Utc::now();
        let task = Task {
            id: next_id("task-", tasks.iter().map(|t| t.id.as_str())),
            title: new.title,
            description: new.description,
            status: new.status,
            priority: new.priority,
            assignee_id: new.assignee_id,
            project_id: new.project_id,
            sprint_id: new.sprint_id,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        debug!("created task {}", task.id);
        tasks.insert(0, task.clone());
        task
    }

    /// Merge a patch into a task and refresh its `updated_at`.
    /// Last write wins; there is no conflict detection.
    pub async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task> {
        self.latency.pause(UPDATE_MS).await;
        let mut tasks = self.tasks.lock().await;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::TaskNotFound { id: id.to_string() })?;
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(assignee_id) = patch.assignee_id {
            task.assignee_id = assignee_id;
        }
        if let Some(sprint_id) = patch.sprint_id {
            task.sprint_id = sprint_id;
        }
        if let Some(comments) = patch.comments {
            task.comments = comments;
        }
        task.updated_at = Utc::now();
        debug!("updated task {id}");
        Ok(task.clone())
    }

    /// Remove a task and return it.
    pub async fn delete(&self, id: &str) -> Result<Task> {
        self.latency.pause(DELETE_MS).await;
        let mut tasks = self.tasks.lock().await;
        let idx = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::TaskNotFound { id: id.to_string() })?;
        debug!("deleted task {id}");
        Ok(tasks.remove(idx))
    }

    /// Tasks belonging to a project.
    pub async fn by_project(&self, project_id: &str) -> Vec<Task> {
        self.latency.pause(QUERY_MS).await;
        let tasks = self.tasks.lock().await;
        tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect()
    }

    /// Tasks assigned to a sprint.
    pub async fn by_sprint(&self, sprint_id: &str) -> Vec<Task> {
        self.latency.pause(QUERY_MS).await;
        let tasks = self.tasks.lock().await;
        tasks
            .iter()
            .filter(|t| t.sprint_id.as_deref() == Some(sprint_id))
            .cloned()
            .collect()
    }

    /// Tasks in a given board column.
    pub async fn by_status(&self, status: Status) -> Vec<Task> {
        self.latency.pause(QUERY_MS).await;
        let tasks = self.tasks.lock().await;
        tasks
            .iter()
            .filter(|t| t.status == status)
            .cloned()
            .collect()
    }
}

/// Store for the sprint collection.
#[derive(Debug)]
pub struct SprintStore {
    sprints: Mutex<Vec<Sprint>>,
    latency: Latency,
}

impl SprintStore {
    pub fn new(sprints: Vec<Sprint>, latency: Latency) -> Self {
        SprintStore {
            sprints: Mutex::new(sprints),
            latency,
        }
    }

    /// Snapshot of every sprint, newest first.
    pub async fn list(&self) -> Vec<Sprint> {
        self.latency.pause(LIST_MS).await;
        self.sprints.lock().await.clone()
    }

    /// Fetch a single sprint by id.
    pub async fn get(&self, id: &str) -> Result<Sprint> {
        self.latency.pause(GET_MS).await;
        let sprints = self.sprints.lock().await;
        sprints
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| StoreError::SprintNotFound { id: id.to_string() })
    }

    /// Create a sprint: assigns the next id, stamps `created_at`, prepends.
    pub async fn create(&self, new: NewSprint) -> Sprint {
        self.latency.pause(CREATE_MS).await;
        let mut sprints = self.sprints.lock().await;
        let sprint = Sprint {
            id: next_id("sprint-", sprints.iter().map(|s| s.id.as_str())),
            name: new.name,
            start_date: new.start_date,
            end_date: new.end_date,
            status: new.status,
            project_id: new.project_id,
            created_at: Utc::now(),
        };
        debug!("created sprint {}", sprint.id);
        sprints.insert(0, sprint.clone());
        sprint
    }

    /// Merge a patch into a sprint. Last write wins.
    pub async fn update(&self, id: &str, patch: SprintPatch) -> Result<Sprint> {
        self.latency.pause(UPDATE_MS).await;
        let mut sprints = self.sprints.lock().await;
        let sprint = sprints
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::SprintNotFound { id: id.to_string() })?;
        if let Some(name) = patch.name {
            sprint.name = name;
        }
        if let Some(start_date) = patch.start_date {
            sprint.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            sprint.end_date = end_date;
        }
        if let Some(status) = patch.status {
            sprint.status = status;
        }
        debug!("updated sprint {id}");
        Ok(sprint.clone())
    }

    /// Remove a sprint and return it. Member tasks keep their `sprint_id`
    /// and simply stop resolving; callers detach them first if they care.
    pub async fn delete(&self, id: &str) -> Result<Sprint> {
        self.latency.pause(DELETE_MS).await;
        let mut sprints = self.sprints.lock().await;
        let idx = sprints
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::SprintNotFound { id: id.to_string() })?;
        debug!("deleted sprint {id}");
        Ok(sprints.remove(idx))
    }

    /// Sprints belonging to a project.
    pub async fn by_project(&self, project_id: &str) -> Vec<Sprint> {
        self.latency.pause(QUERY_MS).await;
        let sprints = self.sprints.lock().await;
        sprints
            .iter()
            .filter(|s| s.project_id == project_id)
            .cloned()
            .collect()
    }

    /// Currently active sprints.
    pub async fn active(&self) -> Vec<Sprint> {
        self.latency.pause(QUERY_MS).await;
        let sprints = self.sprints.lock().await;
        sprints
            .iter()
            .filter(|s| s.status == SprintStatus::Active)
            .cloned()
            .collect()
    }
}

/// Store for the project collection. Projects are reference data, so only
/// read operations are exposed.
#[derive(Debug)]
pub struct ProjectStore {
    projects: Mutex<Vec<Project>>,
    latency: Latency,
}

impl ProjectStore {
    pub fn new(projects: Vec<Project>, latency: Latency) -> Self {
        ProjectStore {
            projects: Mutex::new(projects),
            latency,
        }
    }

    /// Snapshot of every project.
    pub async fn list(&self) -> Vec<Project> {
        self.latency.pause(LIST_MS).await;
        self.projects.lock().await.clone()
    }

    /// Fetch a single project by id.
    pub async fn get(&self, id: &str) -> Result<Project> {
        self.latency.pause(GET_MS).await;
        let projects = self.projects.lock().await;
        projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::ProjectNotFound { id: id.to_string() })
    }
}

/// Store for the user collection. Read-only, like projects.
#[derive(Debug)]
pub struct UserStore {
    users: Mutex<Vec<User>>,
    latency: Latency,
}

impl UserStore {
    pub fn new(users: Vec<User>, latency: Latency) -> Self {
        UserStore {
            users: Mutex::new(users),
            latency,
        }
    }

    /// Snapshot of every team member.
    pub async fn list(&self) -> Vec<User> {
        self.latency.pause(LIST_MS).await;
        self.users.lock().await.clone()
    }

    /// Fetch a single user by id.
    pub async fn get(&self, id: &str) -> Result<User> {
        self.latency.pause(GET_MS).await;
        let users = self.users.lock().await;
        users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| StoreError::UserNotFound { id: id.to_string() })
    }
}

/// Seed document the stores are initialised from.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub sprints: Vec<Sprint>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

const EMBEDDED_SEED: &str = include_str!("../data/seed.json");

/// All four stores, built once at startup and passed by reference.
#[derive(Debug)]
pub struct Stores {
    pub tasks: TaskStore,
    pub sprints: SprintStore,
    pub projects: ProjectStore,
    pub users: UserStore,
}

impl Stores {
    /// Build the stores from a seed document.
    pub fn from_seed(seed: Seed, latency: Latency) -> Self {
        info!(
            "seeded {} tasks, {} sprints, {} projects, {} users",
            seed.tasks.len(),
            seed.sprints.len(),
            seed.projects.len(),
            seed.users.len()
        );
        Stores {
            tasks: TaskStore::new(seed.tasks, latency),
            sprints: SprintStore::new(seed.sprints, latency),
            projects: ProjectStore::new(seed.projects, latency),
            users: UserStore::new(seed.users, latency),
        }
    }

    /// Load the stores from a seed file, or the embedded demo data when no
    /// path is given. Malformed seed data fails here, at startup.
    pub fn load(path: Option<&Path>, latency: Latency) -> Result<Self> {
        let seed = match path {
            Some(p) => serde_json::from_str(&fs::read_to_string(p)?)?,
            None => serde_json::from_str(EMBEDDED_SEED)?,
        };
        Ok(Stores::from_seed(seed, latency))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::fields::Priority;

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.into(),
            description: String::new(),
            status: Status::ToDo,
            priority: Priority::Medium,
            assignee_id: None,
            project_id: "proj-1".into(),
            sprint_id: None,
        }
    }

    fn empty_stores() -> Stores {
        Stores::from_seed(Seed::default(), Latency::zero())
    }

    #[tokio::test]
    async fn create_assigns_ids_and_prepends() {
        let stores = empty_stores();
        let first = stores.tasks.create(new_task("First")).await;
        let second = stores.tasks.create(new_task("Second")).await;
        assert_eq!(first.id, "task-1");
        assert_eq!(second.id, "task-2");

        let all = stores.tasks.list().await;
        assert_eq!(all[0].title, "Second");
        assert_eq!(all[1].title, "First");
    }

    #[tokio::test]
    async fn get_unknown_task_is_not_found() {
        let stores = empty_stores();
        let err = stores.tasks.get("task-99").await.unwrap_err();
        assert!(matches!(err, StoreError::TaskNotFound { id } if id == "task-99"));
    }

    #[tokio::test]
    async fn update_merges_patch_and_refreshes_updated_at() {
        let stores = empty_stores();
        let task = stores.tasks.create(new_task("Patch me")).await;

        let patch = TaskPatch {
            status: Some(Status::Done),
            assignee_id: Some(Some("user-1".into())),
            ..Default::default()
        };
        let updated = stores.tasks.update(&task.id, patch).await.unwrap();
        assert_eq!(updated.status, Status::Done);
        assert_eq!(updated.assignee_id.as_deref(), Some("user-1"));
        assert_eq!(updated.title, "Patch me");
        assert!(updated.updated_at >= task.updated_at);
    }

    #[tokio::test]
    async fn patch_distinguishes_clear_from_leave() {
        let stores = empty_stores();
        let mut draft = new_task("Sprint member");
        draft.sprint_id = Some("sprint-1".into());
        let task = stores.tasks.create(draft).await;

        // A patch without sprint_id leaves membership alone.
        let untouched = stores
            .tasks
            .update(&task.id, TaskPatch { title: Some("Renamed".into()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(untouched.sprint_id.as_deref(), Some("sprint-1"));

        // Some(None) detaches the task from its sprint.
        let cleared = stores
            .tasks
            .update(&task.id, TaskPatch { sprint_id: Some(None), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(cleared.sprint_id, None);
    }

    #[tokio::test]
    async fn delete_removes_and_returns_the_task() {
        let stores = empty_stores();
        let task = stores.tasks.create(new_task("Doomed")).await;
        let removed = stores.tasks.delete(&task.id).await.unwrap();
        assert_eq!(removed.id, task.id);
        assert!(stores.tasks.list().await.is_empty());

        let err = stores.tasks.delete(&task.id).await.unwrap_err();
        assert!(matches!(err, StoreError::TaskNotFound { .. }));
    }

    #[tokio::test]
    async fn queries_filter_by_sprint_project_and_status() {
        let stores = empty_stores();
        let mut a = new_task("A");
        a.sprint_id = Some("sprint-1".into());
        let mut b = new_task("B");
        b.status = Status::Done;
        b.project_id = "proj-2".into();
        stores.tasks.create(a).await;
        stores.tasks.create(b).await;

        let in_sprint = stores.tasks.by_sprint("sprint-1").await;
        assert_eq!(in_sprint.len(), 1);
        assert_eq!(in_sprint[0].title, "A");

        let in_project = stores.tasks.by_project("proj-2").await;
        assert_eq!(in_project.len(), 1);
        assert_eq!(in_project[0].title, "B");

        let done = stores.tasks.by_status(Status::Done).await;
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].title, "B");
    }

    #[tokio::test]
    async fn sprint_lifecycle_updates_and_active_query() {
        let stores = empty_stores();
        let sprint = stores
            .sprints
            .create(NewSprint {
                name: "Iteration 1".into(),
                start_date: "2026-08-17".parse().unwrap(),
                end_date: "2026-08-28".parse().unwrap(),
                status: SprintStatus::Planned,
                project_id: "proj-1".into(),
            })
            .await;
        assert_eq!(sprint.id, "sprint-1");
        assert!(stores.sprints.active().await.is_empty());

        let patch = SprintPatch { status: Some(SprintStatus::Active), ..Default::default() };
        let started = stores.sprints.update(&sprint.id, patch).await.unwrap();
        assert_eq!(started.status, SprintStatus::Active);

        let active = stores.sprints.active().await;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, sprint.id);
    }

    #[tokio::test]
    async fn sprint_delete_removes_the_record() {
        let stores = empty_stores();
        let sprint = stores
            .sprints
            .create(NewSprint {
                name: "Doomed".into(),
                start_date: "2026-09-01".parse().unwrap(),
                end_date: "2026-09-12".parse().unwrap(),
                status: SprintStatus::Planned,
                project_id: "proj-1".into(),
            })
            .await;
        let removed = stores.sprints.delete(&sprint.id).await.unwrap();
        assert_eq!(removed.id, sprint.id);
        assert!(stores.sprints.list().await.is_empty());

        let err = stores.sprints.delete(&sprint.id).await.unwrap_err();
        assert!(matches!(err, StoreError::SprintNotFound { .. }));
    }

    #[tokio::test]
    async fn embedded_seed_parses_and_is_consistent() {
        let stores = Stores::load(None, Latency::zero()).unwrap();
        let tasks = stores.tasks.list().await;
        let sprints = stores.sprints.list().await;
        let projects = stores.projects.list().await;
        let users = stores.users.list().await;

        assert!(!tasks.is_empty());
        assert!(!sprints.is_empty());
        assert!(!projects.is_empty());
        assert!(!users.is_empty());

        // Every reference in the seed resolves.
        for task in &tasks {
            assert!(projects.iter().any(|p| p.id == task.project_id));
            if let Some(assignee) = &task.assignee_id {
                assert!(users.iter().any(|u| &u.id == assignee));
            }
            if let Some(sprint_id) = &task.sprint_id {
                assert!(sprints.iter().any(|s| &s.id == sprint_id));
            }
        }
        for sprint in &sprints {
            assert!(sprint.start_date <= sprint.end_date);
        }
    }

    #[tokio::test]
    async fn seed_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"projects": [], "users": [], "sprints": [], "tasks": [
                {{"id": "task-1", "title": "From file", "description": "",
                  "status": "to-do", "priority": "low", "assignee_id": null,
                  "project_id": "proj-1", "sprint_id": null,
                  "created_at": "2026-08-01T09:00:00Z",
                  "updated_at": "2026-08-01T09:00:00Z"}}
            ]}}"#
        )
        .unwrap();

        let stores = Stores::load(Some(file.path()), Latency::zero()).unwrap();
        let tasks = stores.tasks.list().await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "From file");

        let err = Stores::load(Some(Path::new("/nonexistent/seed.json")), Latency::zero());
        assert!(matches!(err, Err(StoreError::SeedIo(_))));
    }
}
