// src/cli.rs

//! CLI argument parsing using `clap`.

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::task::Priority;

/// Command-line arguments for `tripcheck`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tripcheck",
    version,
    about = "Trip checklist with task prerequisites.",
    long_about = None,
    arg_required_else_help = true
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Tripcheck.toml` in the current working directory; a missing
    /// default file means built-in defaults.
    #[arg(long, global = true, value_name = "PATH", default_value = "Tripcheck.toml")]
    pub config: String,

    /// Trip whose checklist to operate on.
    #[arg(long, global = true, value_name = "KEY", default_value = "default")]
    pub trip: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TRIPCHECK_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the checklist with completion and blocking status.
    #[command(alias = "ls")]
    List {
        /// Print the raw collection as JSON instead.
        #[arg(long)]
        json: bool,
    },

    /// Add a task.
    Add(AddArgs),

    /// Change a task's description or metadata.
    Edit(EditArgs),

    /// Toggle a task between done and not done.
    #[command(alias = "toggle")]
    Done {
        /// Task id (a unique prefix is enough).
        id: String,
    },

    /// Dependency operations.
    #[command(alias = "deps")]
    Dep {
        #[command(subcommand)]
        cmd: DepCmd,
    },

    /// Delete a task.
    #[command(alias = "delete")]
    Rm {
        /// Task id (a unique prefix is enough).
        id: String,
        /// Also unlink it from tasks that depend on it.
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Print tasks prerequisites-first.
    Order,

    /// List trips that have a saved checklist.
    Trips,
}

#[derive(Debug, Clone, Subcommand)]
pub enum DepCmd {
    /// ID depends on ON (ID cannot be completed before ON).
    Add { id: String, on: String },
    /// Remove the dependency of ID on ON.
    Rm { id: String, on: String },
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Task description.
    pub text: String,

    /// Due date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Time of day (HH:MM or HH:MM:SS).
    #[arg(long, value_parser = parse_time)]
    pub time: Option<NaiveTime>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long, value_enum, default_value_t = PriorityArg::Medium)]
    pub priority: PriorityArg,
}

#[derive(Debug, Clone, Args)]
pub struct EditArgs {
    /// Task id (a unique prefix is enough).
    pub id: String,

    #[arg(long)]
    pub text: Option<String>,

    #[arg(long, value_parser = parse_date, conflicts_with = "clear_date")]
    pub date: Option<NaiveDate>,

    #[arg(long)]
    pub clear_date: bool,

    #[arg(long, value_parser = parse_time, conflicts_with = "clear_time")]
    pub time: Option<NaiveTime>,

    #[arg(long)]
    pub clear_time: bool,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,

    /// Raw JSON patch, as sent by the planner UI. Overrides the flags above.
    #[arg(long, value_name = "JSON")]
    pub patch: Option<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Priority as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(p: PriorityArg) -> Self {
        match p {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| format!("invalid time '{s}' (expected HH:MM): {e}"))
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
