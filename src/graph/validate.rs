// src/graph/validate.rs

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{Result, TripcheckError};
use crate::task::TaskCollection;
use crate::types::TaskId;

/// Check the structural invariants of a collection that came from outside the
/// manager (a store, an import).
///
/// Checks, in order:
/// - ids are unique and text is non-blank,
/// - `completedAt` is present exactly when `completed` is true,
/// - no task depends on itself or on a task missing from the collection,
/// - the dependency graph has no cycle.
pub fn validate_collection(collection: &TaskCollection) -> Result<()> {
    validate_records(collection)?;
    validate_dependencies(collection)?;
    validate_acyclic(collection)?;
    Ok(())
}

/// Prerequisites-first ordering of the whole collection, for display.
///
/// Fails with [`TripcheckError::DependencyCycle`] if the graph is not a DAG.
pub fn suggested_order(collection: &TaskCollection) -> Result<Vec<TaskId>> {
    let graph = prerequisite_graph(collection);
    toposort(&graph, None).map_err(|cycle| {
        TripcheckError::DependencyCycle(format!(
            "cycle detected in task dependencies involving task '{}'",
            cycle.node_id()
        ))
    })
}

fn validate_records(collection: &TaskCollection) -> Result<()> {
    let mut seen: HashSet<TaskId> = HashSet::new();

    for task in collection.iter() {
        if !seen.insert(task.id) {
            return Err(TripcheckError::CorruptCollection(format!(
                "duplicate task id {}",
                task.id
            )));
        }
        if task.text.trim().is_empty() {
            return Err(TripcheckError::CorruptCollection(format!(
                "task {} has empty text",
                task.id
            )));
        }
        if task.completed != task.completed_at.is_some() {
            return Err(TripcheckError::CorruptCollection(format!(
                "task {} has completed = {} but completedAt = {:?}",
                task.id, task.completed, task.completed_at
            )));
        }
    }
    Ok(())
}

fn validate_dependencies(collection: &TaskCollection) -> Result<()> {
    for task in collection.iter() {
        let mut seen: HashSet<TaskId> = HashSet::new();
        for dep in task.dependencies.iter().copied() {
            if dep == task.id {
                return Err(TripcheckError::CorruptCollection(format!(
                    "task {} depends on itself",
                    task.id
                )));
            }
            if !collection.contains(dep) {
                return Err(TripcheckError::CorruptCollection(format!(
                    "task {} has unknown dependency {}",
                    task.id, dep
                )));
            }
            if !seen.insert(dep) {
                return Err(TripcheckError::CorruptCollection(format!(
                    "task {} lists dependency {} more than once",
                    task.id, dep
                )));
            }
        }
    }
    Ok(())
}

fn validate_acyclic(collection: &TaskCollection) -> Result<()> {
    suggested_order(collection).map(|_| ())
}

// Edge direction: prerequisite -> dependent, so a topological order lists
// prerequisites first.
fn prerequisite_graph(collection: &TaskCollection) -> DiGraphMap<TaskId, ()> {
    let mut graph: DiGraphMap<TaskId, ()> = DiGraphMap::new();

    for task in collection.iter() {
        graph.add_node(task.id);
    }

    for task in collection.iter() {
        for dep in task.dependencies.iter().copied() {
            if collection.contains(dep) {
                graph.add_edge(dep, task.id, ());
            }
        }
    }

    graph
}
