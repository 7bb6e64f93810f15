// src/board.rs

//! Host shell around the pure manager.
//!
//! [`TaskManager`] knows nothing about storage. A [`TripBoard`] binds one
//! trip key to a [`CollectionStore`] and runs each [`TaskCommand`] as
//! load-latest → validate → apply → save, so commands never operate on a
//! stale copy. If another writer saved in between, `save` fails with
//! [`crate::errors::TripcheckError::StaleSnapshot`] and nothing is written.

use tracing::{debug, info};

use crate::errors::{Rejection, Result};
use crate::graph::validate_collection;
use crate::manager::TaskManager;
use crate::store::{CollectionStore, Snapshot, TripKey};
use crate::task::{TaskCollection, TaskFields, TaskPatch};
use crate::types::TaskId;

/// One user intent, as handed over by a UI or the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    Add { text: String, fields: TaskFields },
    Edit { id: TaskId, patch: TaskPatch },
    ToggleCompletion { id: TaskId },
    AddDependency { id: TaskId, depends_on: TaskId },
    RemoveDependency { id: TaskId, depends_on: TaskId },
    Delete { id: TaskId, confirmed: bool },
}

/// Result of a command that did not fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardOutcome {
    /// The command was applied and saved.
    Applied {
        revision: u64,
        collection: TaskCollection,
    },
    /// The command was refused; the stored collection is unchanged.
    Rejected(Rejection),
}

/// Run a command against a collection. Pure; no storage involved.
pub fn execute(
    manager: &TaskManager,
    collection: &TaskCollection,
    command: &TaskCommand,
) -> std::result::Result<TaskCollection, Rejection> {
    match command {
        TaskCommand::Add { text, fields } => manager.add(collection, text, fields.clone()),
        TaskCommand::Edit { id, patch } => manager.edit(collection, *id, patch),
        TaskCommand::ToggleCompletion { id } => manager.toggle_completion(collection, *id),
        TaskCommand::AddDependency { id, depends_on } => {
            manager.add_dependency(collection, *id, *depends_on)
        }
        TaskCommand::RemoveDependency { id, depends_on } => {
            manager.remove_dependency(collection, *id, *depends_on)
        }
        TaskCommand::Delete { id, confirmed } => manager.delete(collection, *id, *confirmed),
    }
}

#[derive(Debug)]
pub struct TripBoard<S: CollectionStore> {
    store: S,
    trip: TripKey,
    manager: TaskManager,
}

impl<S: CollectionStore> TripBoard<S> {
    pub fn new(store: S, trip: TripKey, manager: TaskManager) -> Self {
        Self {
            store,
            trip,
            manager,
        }
    }

    pub fn trip(&self) -> &TripKey {
        &self.trip
    }

    pub fn manager(&self) -> &TaskManager {
        &self.manager
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Latest stored snapshot, after structural validation.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let snapshot = self.store.load(&self.trip)?;
        validate_collection(&snapshot.collection)?;
        Ok(snapshot)
    }

    /// Apply `command` to the latest snapshot and persist the result.
    pub fn apply(&self, command: TaskCommand) -> Result<BoardOutcome> {
        let snapshot = self.snapshot()?;

        match execute(&self.manager, &snapshot.collection, &command) {
            Ok(collection) => {
                if collection == snapshot.collection {
                    debug!(trip = %self.trip, ?command, "command changed nothing; skipping save");
                    return Ok(BoardOutcome::Applied {
                        revision: snapshot.revision,
                        collection,
                    });
                }

                let revision = self
                    .store
                    .save(&self.trip, snapshot.revision, &collection)?;
                info!(trip = %self.trip, revision, "command applied");
                Ok(BoardOutcome::Applied {
                    revision,
                    collection,
                })
            }
            Err(rejection) => {
                info!(trip = %self.trip, reason = %rejection, "command rejected");
                Ok(BoardOutcome::Rejected(rejection))
            }
        }
    }
}
