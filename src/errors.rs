// src/errors.rs

//! Crate-wide error types.
//!
//! Two families live here:
//! - [`Rejection`]: expected, recoverable refusals of a task operation. These
//!   are ordinary return values; the host shows the message and carries on.
//! - [`TripcheckError`]: genuine faults in the host layers (config, storage,
//!   corrupt snapshots).

use thiserror::Error;

use crate::types::TaskId;

/// Why a task operation was refused.
///
/// Every variant renders a distinct message that can be shown to the user
/// as-is. A rejected operation never mutates the collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("invalid task: {0}")]
    Validation(String),

    #[error("task {task} cannot depend on itself")]
    SelfDependency { task: TaskId },

    #[error(
        "task {task} cannot depend on {depends_on}: {depends_on} already depends on {task} via {}",
        format_chain(.path)
    )]
    WouldCreateCycle {
        task: TaskId,
        depends_on: TaskId,
        /// Existing chain `depends_on -> ... -> task` that the new edge would close.
        path: Vec<TaskId>,
    },

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error(
        "task {task} is a prerequisite of {}; confirm to delete it and unlink them",
        format_list(.dependents)
    )]
    RequiresConfirmation { task: TaskId, dependents: Vec<TaskId> },

    #[error(
        "task {task} cannot be completed yet; open prerequisites: {}",
        format_list(.open)
    )]
    DependenciesIncomplete { task: TaskId, open: Vec<TaskId> },

    #[error("task {0} is completed; reopen it before changing it")]
    TaskCompleted(TaskId),
}

impl Rejection {
    /// `true` for the two-phase delete signal, which is a question rather
    /// than a refusal.
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, Rejection::RequiresConfirmation { .. })
    }
}

fn format_list(ids: &[TaskId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_chain(ids: &[TaskId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[derive(Error, Debug)]
pub enum TripcheckError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Corrupt task collection: {0}")]
    CorruptCollection(String),

    #[error("Cycle detected in task dependencies: {0}")]
    DependencyCycle(String),

    #[error("Stale snapshot for trip '{trip}': loaded revision {expected}, store is at {actual}")]
    StaleSnapshot {
        trip: String,
        expected: u64,
        actual: u64,
    },

    #[error("Invalid trip key '{0}' (allowed: letters, digits, '-' and '_')")]
    InvalidTripKey(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TripcheckError>;
