// src/task/collection.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::task::model::Task;
use crate::types::TaskId;

/// Ordered list of a trip's tasks; the unit of persistence.
///
/// Serialises as a bare JSON array. Mutation happens only through
/// [`crate::manager::TaskManager`], which always hands back a replacement
/// collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing task list as-is.
    ///
    /// No invariants are checked; run [`crate::graph::validate_collection`]
    /// on anything read from outside the manager.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.tasks.iter().map(|t| t.id)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Tasks that list `id` as a direct prerequisite, in collection order.
    pub fn dependents_of(&self, id: TaskId) -> Vec<TaskId> {
        self.tasks
            .iter()
            .filter(|t| t.depends_on(id))
            .map(|t| t.id)
            .collect()
    }

    /// Transient id -> task lookup for a single query.
    pub fn index(&self) -> HashMap<TaskId, &Task> {
        self.tasks.iter().map(|t| (t.id, t)).collect()
    }

    /// Copy of this collection with `task` appended.
    pub(crate) fn with_appended(&self, task: Task) -> Self {
        let mut tasks = self.tasks.clone();
        tasks.push(task);
        Self { tasks }
    }

    /// Copy of this collection with the task of the same id swapped for
    /// `task`. Order is preserved.
    pub(crate) fn with_replaced(&self, task: Task) -> Self {
        let tasks = self
            .tasks
            .iter()
            .map(|t| if t.id == task.id { task.clone() } else { t.clone() })
            .collect();
        Self { tasks }
    }

    /// Copy of this collection without `id`, with `id` stripped from every
    /// remaining task's dependencies.
    pub(crate) fn without(&self, id: TaskId) -> Self {
        let tasks = self
            .tasks
            .iter()
            .filter(|t| t.id != id)
            .map(|t| {
                let mut t = t.clone();
                t.dependencies.retain(|d| *d != id);
                t
            })
            .collect();
        Self { tasks }
    }
}

impl FromIterator<Task> for TaskCollection {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TaskCollection {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
