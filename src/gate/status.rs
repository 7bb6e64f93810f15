// src/gate/status.rs

//! Derived, display-only task status.

use crate::gate::state::open_prerequisites;
use crate::graph::DependencyView;
use crate::task::TaskCollection;
use crate::types::{GatingDepth, TaskId};

/// What the checklist shows next to a task. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Done,
    /// Incomplete and free to be completed now.
    Ready,
    /// Incomplete with open prerequisites.
    Blocked { open: Vec<TaskId> },
}

impl TaskStatus {
    pub fn is_blocked(&self) -> bool {
        matches!(self, TaskStatus::Blocked { .. })
    }
}

/// Status of a single task, or `None` if it is not in the collection.
pub fn status_of(collection: &TaskCollection, task: TaskId, depth: GatingDepth) -> Option<TaskStatus> {
    let view = DependencyView::build(collection);
    status_in_view(&view, task, depth)
}

fn status_in_view(view: &DependencyView<'_>, task: TaskId, depth: GatingDepth) -> Option<TaskStatus> {
    let t = view.task(task)?;
    if t.completed {
        return Some(TaskStatus::Done);
    }

    let open = open_prerequisites(view, task, depth);
    if open.is_empty() {
        Some(TaskStatus::Ready)
    } else {
        Some(TaskStatus::Blocked { open })
    }
}

/// Checklist totals for a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub total: usize,
    pub done: usize,
    pub ready: usize,
    pub blocked: usize,
}

impl Progress {
    pub fn of(collection: &TaskCollection, depth: GatingDepth) -> Self {
        let view = DependencyView::build(collection);
        let mut progress = Progress {
            total: collection.len(),
            ..Progress::default()
        };

        for id in collection.ids() {
            match status_in_view(&view, id, depth) {
                Some(TaskStatus::Done) => progress.done += 1,
                Some(TaskStatus::Ready) => progress.ready += 1,
                Some(TaskStatus::Blocked { .. }) => progress.blocked += 1,
                None => {}
            }
        }

        progress
    }

    /// Whole-number percentage of completed tasks; 0 for an empty checklist.
    pub fn percent_done(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.done * 100) / self.total) as u8
    }
}
