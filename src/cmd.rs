//! Command implementations for the CLI interface.
//!
//! This module contains all the command handlers behind the subcommands,
//! from board and backlog listings through task CRUD to sprint lifecycle
//! management and the TUI launcher. Handlers fetch snapshots through the
//! stores, run the pure engines, and print aligned tables.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use chrono::{Duration, Local, NaiveDate, Utc};
use tokio::runtime::Runtime;

use crate::backlog::{sort_backlog, split_by_sprint, unassigned};
use crate::board::group_by_status;
use crate::fields::{Priority, SprintStatus, Status};
use crate::filter::{filter_tasks, TaskFilter};
use crate::project::User;
use crate::report::{priority_distribution, sprint_overview, status_distribution, summary};
use crate::sprint::{NewSprint, Sprint, SprintPatch};
use crate::store::Stores;
use crate::task::{Comment, NewTask, Task, TaskPatch};
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI interface.
    Ui,

    /// Show the kanban board grouped by status.
    Board {
        /// Filter by assignee user ID.
        #[arg(long)]
        assignee: Option<String>,
        /// Filter by priority.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Filter by status.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Filter by sprint ID.
        #[arg(long)]
        sprint: Option<String>,
    },

    /// List tasks ordered by priority, then recency.
    Backlog {
        /// Filter by assignee user ID.
        #[arg(long)]
        assignee: Option<String>,
        /// Filter by priority.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Filter by status.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Filter by sprint ID.
        #[arg(long)]
        sprint: Option<String>,
        /// Only tasks not planned into any sprint.
        #[arg(long)]
        unassigned: bool,
    },

    /// Show all sprints with dates, progress, and member counts.
    Sprints {
        /// Restrict to sprints of this project ID.
        #[arg(long)]
        project: Option<String>,
    },

    /// Show summary stats and distributions across tasks and sprints.
    Reports,

    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
        /// Priority level: low | medium | high.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        /// Status: to-do | in-progress | testing | done.
        #[arg(long, value_enum, default_value_t = Status::ToDo)]
        status: Status,
        /// Assignee user ID.
        #[arg(long)]
        assignee: Option<String>,
        /// Sprint ID to plan the task into.
        #[arg(long)]
        sprint: Option<String>,
        /// Project ID (defaults to the first project).
        #[arg(long)]
        project: Option<String>,
    },

    /// View a single task by ID, comments included.
    View {
        /// Task ID to view
        id: String,
    },

    /// Update fields on a task.
    Update {
        /// Task ID to update
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Assignee user ID.
        #[arg(long)]
        assignee: Option<String>,
        /// Sprint ID.
        #[arg(long)]
        sprint: Option<String>,
        /// Clear the assignee.
        #[arg(long)]
        clear_assignee: bool,
        /// Detach the task from its sprint.
        #[arg(long)]
        clear_sprint: bool,
    },

    /// Move a task to another board column.
    Move {
        /// Task ID to move
        id: String,
        /// Target status: to-do | in-progress | testing | done.
        #[arg(value_enum)]
        status: Status,
    },

    /// Append a comment to a task.
    Comment {
        /// Task ID to comment on
        id: String,
        /// Comment text
        text: String,
        /// Author user ID.
        #[arg(long)]
        author: String,
    },

    /// Delete a task by ID.
    Delete {
        /// Task ID to delete
        id: String,
    },

    /// Manage sprints.
    Sprint {
        #[command(subcommand)]
        action: SprintAction,
    },

    /// List projects with their workflows and task counts.
    Projects,

    /// List team members and their assigned task counts.
    Team,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SprintAction {
    /// Create a new sprint in the planned state.
    Create {
        /// Sprint name
        name: String,
        /// Start date: YYYY-MM-DD, "today", "tomorrow", "in Nd", or "in Nw".
        #[arg(long)]
        start: String,
        /// End date, same forms as --start.
        #[arg(long)]
        end: String,
        /// Project ID (defaults to the first project).
        #[arg(long)]
        project: Option<String>,
    },
    /// Start a planned sprint.
    Start {
        /// Sprint ID to start
        id: String,
    },
    /// Complete an active sprint.
    Complete {
        /// Sprint ID to complete
        id: String,
    },
    /// Delete a sprint, moving its tasks back to the backlog.
    Delete {
        /// Sprint ID to delete
        id: String,
    },
    /// Move tasks into or out of a sprint.
    Plan {
        /// Sprint ID to plan
        id: String,
        /// Task ID to add. May be repeated.
        #[arg(long = "add")]
        add: Vec<String>,
        /// Task ID to remove. May be repeated.
        #[arg(long = "remove")]
        remove: Vec<String>,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(rt: &Runtime, stores: &Stores) {
    if let Err(e) = run_tui(rt, stores) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Print the board: one block per status column, in workflow order.
pub async fn cmd_board(
    stores: &Stores,
    assignee: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
    sprint: Option<String>,
) {
    let tasks = stores.tasks.list().await;
    let users = stores.users.list().await;
    let filter = TaskFilter { assignee, priority, status, sprint };
    let visible = filter_tasks(&tasks, &filter);

    for (column_status, column) in group_by_status(&visible) {
        println!("{} ({})", column_status.label(), column.len());
        for t in &column {
            println!(
                "  {:<8} {:<7} {:<14} {}",
                t.id,
                t.priority.label(),
                truncate(&user_name(&users, t.assignee_id.as_deref()), 14),
                t.title
            );
        }
        println!();
    }
}

/// Print the backlog ordered by priority, then recency.
pub async fn cmd_backlog(
    stores: &Stores,
    assignee: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
    sprint: Option<String>,
    only_unassigned: bool,
) {
    let tasks = stores.tasks.list().await;
    let users = stores.users.list().await;
    let filter = TaskFilter { assignee, priority, status, sprint };
    let mut visible = filter_tasks(&tasks, &filter);
    if only_unassigned {
        visible = unassigned(&visible);
    }
    let ordered = sort_backlog(&visible);
    print_task_table(&ordered, &users);
}

/// Print every sprint with dates, days remaining, progress, and the
/// per-status breakdown of its member tasks.
pub async fn cmd_sprints(stores: &Stores, project: Option<String>) {
    let sprints = match project {
        Some(p) => stores.sprints.by_project(&p).await,
        None => stores.sprints.list().await,
    };
    let tasks = stores.tasks.list().await;
    let refs: Vec<&Task> = tasks.iter().collect();
    let today = Local::now().date_naive();

    for row in sprint_overview(&refs, &sprints) {
        let sprint = row.sprint;
        println!("{} ({})  [{}]", sprint.name, sprint.id, sprint.status.label());
        println!(
            "  {} to {}   {}",
            sprint.start_date,
            sprint.end_date,
            format_days_remaining(sprint.end_date, today)
        );
        println!("  Progress: {}% ({} of {} done)", row.percent, row.done, row.total);

        let (members, _) = split_by_sprint(&refs, &sprint.id);
        let counts = status_distribution(&members);
        let breakdown: Vec<String> = counts
            .iter()
            .map(|(status, n)| format!("{}: {}", status.label(), n))
            .collect();
        println!("  {}", breakdown.join("  "));
        println!();
    }
}

/// Print the reports page: summary stats, distributions, sprint progress.
pub async fn cmd_reports(stores: &Stores) {
    let tasks = stores.tasks.list().await;
    let sprints = stores.sprints.list().await;
    let refs: Vec<&Task> = tasks.iter().collect();

    let stats = summary(&refs, &sprints);
    println!(
        "Tasks: {} total, {} done, {} in progress",
        stats.total_tasks, stats.done_tasks, stats.in_progress_tasks
    );
    let active = stores.sprints.active().await;
    if active.is_empty() {
        println!("Active sprints: 0");
    } else {
        let names: Vec<&str> = active.iter().map(|s| s.name.as_str()).collect();
        println!("Active sprints: {} ({})", active.len(), names.join(", "));
    }
    println!();

    println!("{:<13} {}", "Status", "Count");
    for (status, count) in status_distribution(&refs) {
        println!("{:<13} {}", status.label(), count);
    }
    println!();

    println!("{:<13} {}", "Priority", "Count");
    for (priority, count) in priority_distribution(&refs) {
        println!("{:<13} {}", priority.label(), count);
    }
    println!();

    println!("{:<26} {:<10} {}", "Sprint", "Done", "Progress");
    for row in sprint_overview(&refs, &sprints) {
        println!(
            "{:<26} {:<10} {}%",
            truncate(&row.sprint.name, 26),
            format!("{}/{}", row.done, row.total),
            row.percent
        );
    }
}

/// Add a new task.
pub async fn cmd_add(
    stores: &Stores,
    title: String,
    desc: Option<String>,
    priority: Priority,
    status: Status,
    assignee: Option<String>,
    sprint: Option<String>,
    project: Option<String>,
) {
    // Referenced records must exist; filters are permissive, writes are not.
    if let Some(user_id) = &assignee {
        if let Err(e) = stores.users.get(user_id).await {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
    if let Some(sprint_id) = &sprint {
        if let Err(e) = stores.sprints.get(sprint_id).await {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
    let project_id = match project {
        Some(p) => match stores.projects.get(&p).await {
            Ok(found) => found.id,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        None => match stores.projects.list().await.first() {
            Some(first) => first.id.clone(),
            None => {
                eprintln!("No projects in the data set; pass --project.");
                std::process::exit(1);
            }
        },
    };

    let task = stores
        .tasks
        .create(NewTask {
            title,
            description: desc.unwrap_or_default(),
            status,
            priority,
            assignee_id: assignee,
            project_id,
            sprint_id: sprint,
        })
        .await;
    println!("Added task {}", task.id);
}

/// View detailed information about a specific task.
pub async fn cmd_view(stores: &Stores, id: String) {
    let task = match stores.tasks.get(&id).await {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let users = stores.users.list().await;
    let sprints = stores.sprints.list().await;

    println!("ID:           {}", task.id);
    println!("Title:        {}", task.title);
    println!("Status:       {}", task.status.label());
    println!("Priority:     {}", task.priority.label());
    println!("Assignee:     {}", user_name(&users, task.assignee_id.as_deref()));
    println!("Project:      {}", task.project_id);
    println!("Sprint:       {}", sprint_name(&sprints, task.sprint_id.as_deref()));
    println!("Created:      {}", task.created_at.to_rfc3339());
    println!("Updated:      {}", task.updated_at.to_rfc3339());
    println!(
        "Description:\n{}\n",
        if task.description.is_empty() { "-" } else { &task.description }
    );

    println!("Comments ({}):", task.comments.len());
    for comment in &task.comments {
        println!(
            "  [{}] {}: {}",
            comment.created_at.format("%Y-%m-%d %H:%M"),
            user_name(&users, Some(&comment.author_id)),
            comment.text
        );
    }
}

/// Update an existing task's fields.
pub async fn cmd_update(
    stores: &Stores,
    id: String,
    title: Option<String>,
    desc: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
    assignee: Option<String>,
    sprint: Option<String>,
    clear_assignee: bool,
    clear_sprint: bool,
) {
    let patch = TaskPatch {
        title,
        description: desc,
        status,
        priority,
        assignee_id: if clear_assignee { Some(None) } else { assignee.map(Some) },
        sprint_id: if clear_sprint { Some(None) } else { sprint.map(Some) },
        comments: None,
    };
    match stores.tasks.update(&id, patch).await {
        Ok(task) => println!("Updated task {}", task.id),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Move a task to another board column.
pub async fn cmd_move(stores: &Stores, id: String, status: Status) {
    let patch = TaskPatch { status: Some(status), ..Default::default() };
    match stores.tasks.update(&id, patch).await {
        Ok(task) => {
            let column = stores.tasks.by_status(status).await;
            println!(
                "Moved task {} to {} ({} in column)",
                task.id,
                status.label(),
                column.len()
            );
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Append a comment to a task.
pub async fn cmd_comment(stores: &Stores, id: String, text: String, author: String) {
    if let Err(e) = stores.users.get(&author).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
    let task = match stores.tasks.get(&id).await {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut comments = task.comments.clone();
    comments.push(Comment {
        id: Utc::now().timestamp_millis().to_string(),
        text,
        author_id: author,
        created_at: Utc::now(),
    });
    let patch = TaskPatch { comments: Some(comments), ..Default::default() };
    match stores.tasks.update(&id, patch).await {
        Ok(task) => println!("Added comment to task {}", task.id),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Delete a task.
pub async fn cmd_delete(stores: &Stores, id: String) {
    match stores.tasks.delete(&id).await {
        Ok(task) => println!("Deleted task {}", task.id),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Handle sprint management commands.
pub async fn cmd_sprint(stores: &Stores, action: SprintAction) {
    match action {
        SprintAction::Create { name, start, end, project } => {
            let Some(start_date) = parse_date_input(&start) else {
                eprintln!(
                    "Unrecognised start date. Use YYYY-MM-DD, 'today', 'tomorrow', 'in Nd', or 'in Nw'."
                );
                std::process::exit(1);
            };
            let Some(end_date) = parse_date_input(&end) else {
                eprintln!(
                    "Unrecognised end date. Use YYYY-MM-DD, 'today', 'tomorrow', 'in Nd', or 'in Nw'."
                );
                std::process::exit(1);
            };
            if end_date < start_date {
                eprintln!("End date must not be before start date.");
                std::process::exit(1);
            }
            let project_id = match project {
                Some(p) => match stores.projects.get(&p).await {
                    Ok(found) => found.id,
                    Err(e) => {
                        eprintln!("{e}");
                        std::process::exit(1);
                    }
                },
                None => match stores.projects.list().await.first() {
                    Some(first) => first.id.clone(),
                    None => {
                        eprintln!("No projects in the data set; pass --project.");
                        std::process::exit(1);
                    }
                },
            };
            let sprint = stores
                .sprints
                .create(NewSprint {
                    name,
                    start_date,
                    end_date,
                    status: SprintStatus::Planned,
                    project_id,
                })
                .await;
            println!("Created sprint {}", sprint.id);
        }

        SprintAction::Start { id } => {
            let sprint = match stores.sprints.get(&id).await {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            };
            if sprint.status != SprintStatus::Planned {
                eprintln!(
                    "Sprint {} is {}; only planned sprints can start.",
                    sprint.id,
                    sprint.status.label()
                );
                std::process::exit(1);
            }
            let patch = SprintPatch { status: Some(SprintStatus::Active), ..Default::default() };
            match stores.sprints.update(&id, patch).await {
                Ok(s) => println!("Started sprint {}", s.id),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }

        SprintAction::Complete { id } => {
            let sprint = match stores.sprints.get(&id).await {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            };
            if sprint.status != SprintStatus::Active {
                eprintln!(
                    "Sprint {} is {}; only active sprints can complete.",
                    sprint.id,
                    sprint.status.label()
                );
                std::process::exit(1);
            }
            let patch = SprintPatch { status: Some(SprintStatus::Completed), ..Default::default() };
            match stores.sprints.update(&id, patch).await {
                Ok(s) => println!("Completed sprint {}", s.id),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }

        SprintAction::Delete { id } => {
            let sprint = match stores.sprints.get(&id).await {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            };
            // Detach member tasks first so no task points at a dead sprint.
            let members = stores.tasks.by_sprint(&sprint.id).await;
            for task in &members {
                let patch = TaskPatch { sprint_id: Some(None), ..Default::default() };
                if let Err(e) = stores.tasks.update(&task.id, patch).await {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
            match stores.sprints.delete(&sprint.id).await {
                Ok(deleted) => println!(
                    "Deleted sprint {} ({} tasks moved to the backlog)",
                    deleted.id,
                    members.len()
                ),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }

        SprintAction::Plan { id, add, remove } => {
            let sprint = match stores.sprints.get(&id).await {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            };
            for task_id in &add {
                let patch = TaskPatch {
                    sprint_id: Some(Some(sprint.id.clone())),
                    ..Default::default()
                };
                if let Err(e) = stores.tasks.update(task_id, patch).await {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
            for task_id in &remove {
                let task = match stores.tasks.get(task_id).await {
                    Ok(t) => t,
                    Err(e) => {
                        eprintln!("{e}");
                        std::process::exit(1);
                    }
                };
                if task.sprint_id.as_deref() != Some(sprint.id.as_str()) {
                    eprintln!("Task {} is not in sprint {}.", task.id, sprint.id);
                    std::process::exit(1);
                }
                let patch = TaskPatch { sprint_id: Some(None), ..Default::default() };
                if let Err(e) = stores.tasks.update(task_id, patch).await {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
            println!(
                "Planned sprint {}: {} added, {} removed",
                sprint.id,
                add.len(),
                remove.len()
            );
        }
    }
}

/// List projects with their workflows and task counts.
pub async fn cmd_projects(stores: &Stores) {
    let projects = stores.projects.list().await;

    println!("{:<8} {:<6} {:<24} {:<6} {}", "ID", "Key", "Name", "Tasks", "Workflow");
    for project in &projects {
        let count = stores.tasks.by_project(&project.id).await.len();
        let workflow: Vec<&str> = project.workflow.iter().map(|s| s.label()).collect();
        println!(
            "{:<8} {:<6} {:<24} {:<6} {}",
            project.id,
            project.key,
            truncate(&project.name, 24),
            count,
            workflow.join(" > ")
        );
    }
}

/// List team members with their assigned task counts.
pub async fn cmd_team(stores: &Stores) {
    let users = stores.users.list().await;
    let tasks = stores.tasks.list().await;

    println!("{:<8} {:<20} {:<28} {}", "ID", "Name", "Email", "Assigned");
    for user in &users {
        let count = tasks
            .iter()
            .filter(|t| t.assignee_id.as_deref() == Some(user.id.as_str()))
            .count();
        println!(
            "{:<8} {:<20} {:<28} {}",
            user.id,
            truncate(&user.name, 20),
            truncate(&user.email, 28),
            count
        );
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;

    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Print a task table with status, priority, sprint, and assignee columns.
pub fn print_task_table(tasks: &[&Task], users: &[User]) {
    println!(
        "{:<8} {:<12} {:<7} {:<10} {:<14} {}",
        "ID", "Status", "Pri", "Sprint", "Assignee", "Title"
    );
    for t in tasks {
        println!(
            "{:<8} {:<12} {:<7} {:<10} {:<14} {}",
            t.id,
            t.status.label(),
            t.priority.label(),
            t.sprint_id.as_deref().unwrap_or("-"),
            truncate(&user_name(users, t.assignee_id.as_deref()), 14),
            t.title
        );
    }
}

/// Display name for a user, the raw id when unknown, "-" when unset.
pub fn user_name(users: &[User], id: Option<&str>) -> String {
    match id {
        Some(id) => users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| id.to_string()),
        None => "-".into(),
    }
}

/// Display name for a sprint, the raw id when unknown, "-" when unset.
pub fn sprint_name(sprints: &[Sprint], id: Option<&str>) -> String {
    match id {
        Some(id) => sprints
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| id.to_string()),
        None => "-".into(),
    }
}

/// Format a sprint end date relative to today ("3 days left", "ends today").
pub fn format_days_remaining(end: NaiveDate, today: NaiveDate) -> String {
    let days = crate::report::days_remaining(end, today);
    if end < today {
        "ended".into()
    } else if days == 0 {
        "ends today".into()
    } else if days == 1 {
        "1 day left".into()
    } else {
        format!("{days} days left")
    }
}

/// Parse a date: YYYY-MM-DD, "today", "tomorrow", "in Nd", or "in Nw".
pub fn parse_date_input(s: &str) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Some(today + Duration::days(days));
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return Some(today + Duration::weeks(weeks));
            }
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_and_relative_forms() {
        assert_eq!(parse_date_input("2026-09-01"), "2026-09-01".parse().ok());
        assert_eq!(parse_date_input(" 2026-09-01 "), "2026-09-01".parse().ok());

        let today = Local::now().date_naive();
        assert_eq!(parse_date_input("today"), Some(today));
        assert_eq!(parse_date_input("Tomorrow"), Some(today + Duration::days(1)));
        assert_eq!(parse_date_input("in 3d"), Some(today + Duration::days(3)));
        assert_eq!(parse_date_input("in 2w"), Some(today + Duration::weeks(2)));

        assert_eq!(parse_date_input("next sprint"), None);
        assert_eq!(parse_date_input("2026-13-01"), None);
    }

    #[test]
    fn truncate_appends_ellipsis_past_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("a longer title here", 10), "a longer …");
    }

    #[test]
    fn name_lookups_fall_back_to_raw_ids() {
        use chrono::Utc;

        let users = vec![User {
            id: "user-1".into(),
            name: "Ana Barrett".into(),
            email: "ana@example.dev".into(),
            created_at: Utc::now(),
        }];
        assert_eq!(user_name(&users, Some("user-1")), "Ana Barrett");
        assert_eq!(user_name(&users, Some("user-9")), "user-9");
        assert_eq!(user_name(&users, None), "-");
    }

    #[test]
    fn days_remaining_formats_edge_cases() {
        let end: NaiveDate = "2026-08-28".parse().unwrap();
        assert_eq!(format_days_remaining(end, "2026-08-25".parse().unwrap()), "3 days left");
        assert_eq!(format_days_remaining(end, "2026-08-27".parse().unwrap()), "1 day left");
        assert_eq!(format_days_remaining(end, "2026-08-28".parse().unwrap()), "ends today");
        assert_eq!(format_days_remaining(end, "2026-09-01".parse().unwrap()), "ended");
    }
}
