// src/graph/guard.rs

//! Approval checks for graph edits.
//!
//! Both checks are pure: they look at a collection and answer, leaving the
//! actual mutation to [`crate::manager::TaskManager`].

use tracing::debug;

use crate::errors::Rejection;
use crate::graph::view::DependencyView;
use crate::task::TaskCollection;
use crate::types::TaskId;

/// Outcome of an approved edge check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDecision {
    /// The edge is new and safe to add.
    Add,
    /// The edge already exists; adding it again changes nothing.
    AlreadyPresent,
}

/// Approved deletion of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePlan {
    pub task: TaskId,
    /// Former dependents whose `dependencies` must drop `task`.
    pub cascade: Vec<TaskId>,
}

/// May `task -> depends_on` ("task depends on depends_on") be added?
///
/// The edge closes a cycle exactly when `task` is already reachable from
/// `depends_on`, so this runs a full reachability search rather than looking
/// one hop ahead.
pub fn check_add_edge(
    collection: &TaskCollection,
    task: TaskId,
    depends_on: TaskId,
) -> Result<EdgeDecision, Rejection> {
    let view = DependencyView::build(collection);

    let dependent = view.task(task).ok_or(Rejection::TaskNotFound(task))?;
    if !view.contains(depends_on) {
        return Err(Rejection::TaskNotFound(depends_on));
    }

    if task == depends_on {
        return Err(Rejection::SelfDependency { task });
    }

    if dependent.depends_on(depends_on) {
        debug!(task = %task, depends_on = %depends_on, "edge already present");
        return Ok(EdgeDecision::AlreadyPresent);
    }

    if let Some(path) = view.path(depends_on, task) {
        return Err(Rejection::WouldCreateCycle {
            task,
            depends_on,
            path,
        });
    }

    Ok(EdgeDecision::Add)
}

/// May `task` be deleted?
///
/// Deletion is always mechanically possible. When other tasks depend on it the
/// caller must have asked the user first (`confirmed`); the returned plan then
/// carries the edge cascade.
pub fn check_delete(
    collection: &TaskCollection,
    task: TaskId,
    confirmed: bool,
) -> Result<DeletePlan, Rejection> {
    if !collection.contains(task) {
        return Err(Rejection::TaskNotFound(task));
    }

    let dependents = collection.dependents_of(task);
    if !dependents.is_empty() && !confirmed {
        return Err(Rejection::RequiresConfirmation { task, dependents });
    }

    Ok(DeletePlan {
        task,
        cascade: dependents,
    })
}
