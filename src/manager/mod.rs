// src/manager/mod.rs

//! Task collection manager: the only code that produces new collections.
//!
//! Every operation takes the current [`TaskCollection`] by reference and
//! returns either a replacement collection or a [`Rejection`]; the input is
//! never modified. The manager consults:
//! - the completion gate ([`crate::gate`]) before toggling completion,
//! - the graph guard ([`crate::graph`]) before adding an edge or deleting a
//!   task.
//!
//! Persisting the result is the caller's job. Callers must always pass the
//! *latest* collection: applying an operation to a stale copy and saving it
//! silently discards whatever happened in between (for instance it can bring
//! back an edge that a delete cascade removed). [`crate::board::TripBoard`]
//! does this bookkeeping against a [`crate::store::CollectionStore`].

pub mod clock;

use tracing::{debug, info};

use crate::errors::Rejection;
use crate::gate::{self, Transition};
use crate::graph::{self, EdgeDecision};
use crate::task::{DEFAULT_CATEGORY, Task, TaskCollection, TaskFields, TaskPatch};
use crate::types::{GatingDepth, TaskId};

pub use clock::{Clock, IdGenerator, SystemClock, UuidIds};

#[derive(Debug)]
pub struct TaskManager {
    gating: GatingDepth,
    default_category: String,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new(GatingDepth::default())
    }
}

impl TaskManager {
    /// Manager using the system clock and random UUIDs.
    pub fn new(gating: GatingDepth) -> Self {
        Self {
            gating,
            default_category: DEFAULT_CATEGORY.to_string(),
            clock: Box::new(SystemClock),
            ids: Box::new(UuidIds),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    pub fn gating(&self) -> GatingDepth {
        self.gating
    }

    /// Append a new, incomplete task without dependencies.
    ///
    /// The new task is the last element of the returned collection.
    pub fn add(
        &self,
        collection: &TaskCollection,
        text: &str,
        mut fields: TaskFields,
    ) -> Result<TaskCollection, Rejection> {
        if fields.category.is_none() {
            fields.category = Some(self.default_category.clone());
        }

        let id = self.ids.next_id();
        let task = Task::new(id, text, fields, self.clock.now())?;

        assert!(
            !collection.contains(id),
            "id generator produced a colliding task id {id}"
        );

        debug!(task = %id, text = %task.text, "task added");
        Ok(collection.with_appended(task))
    }

    /// Apply a descriptive patch.
    ///
    /// Completed tasks are read-only until reopened.
    pub fn edit(
        &self,
        collection: &TaskCollection,
        id: TaskId,
        patch: &TaskPatch,
    ) -> Result<TaskCollection, Rejection> {
        let task = collection.get(id).ok_or(Rejection::TaskNotFound(id))?;

        if task.completed {
            info!(task = %id, "edit refused: task is completed");
            return Err(Rejection::TaskCompleted(id));
        }

        let updated = task.patched(patch)?;
        debug!(task = %id, "task edited");
        Ok(collection.with_replaced(updated))
    }

    /// Flip completion, subject to the completion gate.
    pub fn toggle_completion(
        &self,
        collection: &TaskCollection,
        id: TaskId,
    ) -> Result<TaskCollection, Rejection> {
        let transition = gate::check_transition(collection, id, self.gating).inspect_err(|r| {
            info!(task = %id, reason = %r, "completion refused");
        })?;

        let mut task = collection
            .get(id)
            .cloned()
            .ok_or(Rejection::TaskNotFound(id))?;
        transition.apply(&mut task, self.clock.now());

        match transition {
            Transition::Complete => debug!(task = %id, "task completed"),
            Transition::Reopen => debug!(task = %id, "task reopened"),
        }
        Ok(collection.with_replaced(task))
    }

    /// Make `id` depend on `depends_on`, subject to the graph guard.
    ///
    /// Adding an edge that already exists returns an identical collection.
    pub fn add_dependency(
        &self,
        collection: &TaskCollection,
        id: TaskId,
        depends_on: TaskId,
    ) -> Result<TaskCollection, Rejection> {
        let decision = graph::check_add_edge(collection, id, depends_on).inspect_err(|r| {
            info!(task = %id, depends_on = %depends_on, reason = %r, "dependency refused");
        })?;

        let mut task = collection
            .get(id)
            .cloned()
            .ok_or(Rejection::TaskNotFound(id))?;

        match decision {
            EdgeDecision::AlreadyPresent => Ok(collection.clone()),
            EdgeDecision::Add => {
                // A completed task with a new open prerequisite would break
                // "completed implies prerequisites completed".
                if task.completed {
                    info!(task = %id, "dependency refused: task is completed");
                    return Err(Rejection::TaskCompleted(id));
                }
                task.dependencies.push(depends_on);
                debug!(task = %id, depends_on = %depends_on, "dependency added");
                Ok(collection.with_replaced(task))
            }
        }
    }

    /// Drop the edge `id -> depends_on` if it exists.
    pub fn remove_dependency(
        &self,
        collection: &TaskCollection,
        id: TaskId,
        depends_on: TaskId,
    ) -> Result<TaskCollection, Rejection> {
        let mut task = collection
            .get(id)
            .cloned()
            .ok_or(Rejection::TaskNotFound(id))?;

        if !task.depends_on(depends_on) {
            return Ok(collection.clone());
        }

        task.dependencies.retain(|d| *d != depends_on);
        debug!(task = %id, depends_on = %depends_on, "dependency removed");
        Ok(collection.with_replaced(task))
    }

    /// Delete a task, unlinking it from its former dependents.
    ///
    /// With dependents present and `confirmed == false` this returns
    /// [`Rejection::RequiresConfirmation`]; ask the user and call again with
    /// `confirmed == true`.
    pub fn delete(
        &self,
        collection: &TaskCollection,
        id: TaskId,
        confirmed: bool,
    ) -> Result<TaskCollection, Rejection> {
        let plan = graph::check_delete(collection, id, confirmed).inspect_err(|r| {
            info!(task = %id, reason = %r, "delete not applied");
        })?;

        debug!(task = %id, cascade = ?plan.cascade, "task deleted");
        Ok(collection.without(plan.task))
    }
}
