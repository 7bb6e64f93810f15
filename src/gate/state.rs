// src/gate/state.rs

//! Completion state machine.
//!
//! Two states, one guarded edge:
//!
//! ```text
//!   Incomplete --(all prerequisites complete)--> Complete
//!   Complete   --(always)-----------------------> Incomplete
//! ```
//!
//! "Blocked" is not a state; it is derived for display in [`super::status`].

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::errors::Rejection;
use crate::graph::DependencyView;
use crate::task::{Task, TaskCollection};
use crate::types::{GatingDepth, TaskId};

/// Stored completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionState {
    Incomplete,
    Complete,
}

impl CompletionState {
    pub fn of(task: &Task) -> Self {
        if task.completed {
            CompletionState::Complete
        } else {
            CompletionState::Incomplete
        }
    }
}

/// An approved completion transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// `Incomplete -> Complete`.
    Complete,
    /// `Complete -> Incomplete`.
    Reopen,
}

impl Transition {
    /// Apply the transition to a task, keeping `completed_at` in step with
    /// `completed`.
    pub fn apply(self, task: &mut Task, now: DateTime<Utc>) {
        match self {
            Transition::Complete => task.mark_completed(now),
            Transition::Reopen => task.mark_incomplete(),
        }
    }
}

/// Decide whether toggling `task` is allowed.
///
/// Reopening is unconditional. Completing requires every prerequisite within
/// `depth` to be complete; otherwise the refusal lists the open ones.
pub fn check_transition(
    collection: &TaskCollection,
    task: TaskId,
    depth: GatingDepth,
) -> Result<Transition, Rejection> {
    let view = DependencyView::build(collection);
    let current = view.task(task).ok_or(Rejection::TaskNotFound(task))?;

    match CompletionState::of(current) {
        CompletionState::Complete => Ok(Transition::Reopen),
        CompletionState::Incomplete => {
            let open = open_prerequisites(&view, task, depth);
            if open.is_empty() {
                Ok(Transition::Complete)
            } else {
                debug!(task = %task, open = open.len(), ?depth, "completion gated on open prerequisites");
                Err(Rejection::DependenciesIncomplete { task, open })
            }
        }
    }
}

/// Prerequisites of `task` within `depth` that are not yet complete.
pub fn open_prerequisites(view: &DependencyView<'_>, task: TaskId, depth: GatingDepth) -> Vec<TaskId> {
    let candidates = match depth {
        GatingDepth::Direct => view.prerequisites_of(task),
        GatingDepth::Transitive => view.all_prerequisites_of(task),
    };

    candidates
        .into_iter()
        .filter(|id| view.task(*id).is_some_and(|t| !t.completed))
        .collect()
}
