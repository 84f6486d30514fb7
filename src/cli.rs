use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Terminal sprint planning and kanban board.
/// Data comes from an embedded demo seed or a JSON file passed via --data.
#[derive(Parser)]
#[command(name = "sb", version, about = "Sprint planning and kanban board CLI")]
pub struct Cli {
    /// Path to a JSON seed file (defaults to the embedded demo data).
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Simulated store latency as a percentage of the mock backend timings
    /// (100 = as-is, 0 = instant).
    #[arg(long, global = true, default_value_t = 100)]
    pub latency: u64,

    #[command(subcommand)]
    pub command: Commands,
}
