//! # sprintboard - Sprint Planning CLI
//!
//! A kanban and sprint planning tool for the terminal, backed by in-memory
//! stores that simulate a remote project tracker.
//!
//! ## Key Features
//!
//! - **Kanban Board**: Four-column workflow (To Do → In Progress → Testing → Done)
//! with card movement from both the CLI and the TUI
//! - **Ordered Backlog**: Tasks ranked by priority then recency, with sprint
//! assignment and an unassigned view
//! - **Sprint Lifecycle**: Create, plan, start, and complete sprints with
//! progress tracking against their task sets
//! - **Reports**: Status and priority distributions plus per-sprint progress
//! - **Filtering Everywhere**: Assignee, priority, status, and sprint filters
//! apply across the board, backlog, and TUI
//! - **Simulated Backend**: Store calls pause like real network requests;
//! `--latency 0` makes them instant for scripting
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the interactive TUI
//! sb ui
//!
//! # Show the board, filtered to one assignee
//! sb board --assignee user-1
//!
//! # Add a task straight into the active sprint
//! sb add "Fix login redirect" --priority high --sprint sprint-2
//!
//! # Move a card along the workflow
//! sb move task-3 done
//!
//! # Start the next sprint
//! sb sprint start sprint-3
//! ```
//!
//! ## CLI Commands
//!
//! - `sb ui` - Launch the TUI (board, backlog, sprints, reports, settings)
//! - `sb board` / `sb backlog` - Column and ranked views of the task set
//! - `sb add <title>` - Create a task with optional metadata
//! - `sb sprint <create|plan|start|complete>` - Manage the sprint lifecycle
//! - `sb reports` - Summary statistics and distributions
//! - `sb projects` / `sb team` - Reference data
//!
//! Data is seeded from a bundled JSON fixture; pass `--data <file>` to load a
//! different data set. Changes live for the lifetime of the process only.

use clap::Parser;
use tokio::runtime::Runtime;
use tracing_subscriber::prelude::*;

pub mod backlog;
pub mod board;
pub mod cli;
pub mod cmd;
pub mod fields;
pub mod filter;
pub mod project;
pub mod report;
pub mod sprint;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod run;
}

use cli::Cli;
use cmd::*;
use store::{Latency, Stores};

/// Initialise tracing with output to stderr so tables and the TUI own stdout.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "sprintboard=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();

    init_tracing();

    // Handle commands that don't need the stores or runtime first
    if let Commands::Completions { shell } = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    let stores = match Stores::load(cli.data.as_deref(), Latency::scaled(cli.latency)) {
        Ok(stores) => stores,
        Err(e) => {
            eprintln!("Failed to load data: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Completions { .. } => unreachable!("completions handled above"),

        Commands::Ui => cmd_ui(&rt, &stores),

        Commands::Board { assignee, priority, status, sprint } =>
            rt.block_on(cmd_board(&stores, assignee, priority, status, sprint)),

        Commands::Backlog { assignee, priority, status, sprint, unassigned } =>
            rt.block_on(cmd_backlog(&stores, assignee, priority, status, sprint, unassigned)),

        Commands::Sprints { project } => rt.block_on(cmd_sprints(&stores, project)),

        Commands::Reports => rt.block_on(cmd_reports(&stores)),

        Commands::Add { title, desc, priority, status, assignee, sprint, project } =>
            rt.block_on(cmd_add(&stores, title, desc, priority, status, assignee, sprint, project)),

        Commands::View { id } => rt.block_on(cmd_view(&stores, id)),

        Commands::Update {
            id, title, desc, priority, status, assignee, sprint, clear_assignee, clear_sprint,
        } => rt.block_on(cmd_update(
            &stores, id, title, desc, priority, status, assignee, sprint,
            clear_assignee, clear_sprint,
        )),

        Commands::Move { id, status } => rt.block_on(cmd_move(&stores, id, status)),

        Commands::Comment { id, text, author } =>
            rt.block_on(cmd_comment(&stores, id, text, author)),

        Commands::Delete { id } => rt.block_on(cmd_delete(&stores, id)),

        Commands::Sprint { action } => rt.block_on(cmd_sprint(&stores, action)),

        Commands::Projects => rt.block_on(cmd_projects(&stores)),

        Commands::Team => rt.block_on(cmd_team(&stores)),
    }
}
