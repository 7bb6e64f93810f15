// src/graph/view.rs

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::{astar, has_path_connecting};
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Dfs;
use tracing::warn;

use crate::task::{Task, TaskCollection};
use crate::types::TaskId;

/// Transient adjacency view over a [`TaskCollection`].
///
/// Edge direction follows the data: `A -> B` means "A depends on B". The view
/// is rebuilt for every query and never stored; collections are small and get
/// replaced wholesale on each mutation, so there is nothing to keep in sync.
#[derive(Debug, Clone)]
pub struct DependencyView<'a> {
    tasks: HashMap<TaskId, &'a Task>,
    graph: DiGraphMap<TaskId, ()>,
}

impl<'a> DependencyView<'a> {
    /// Build the view from a collection.
    ///
    /// Dependencies pointing at ids missing from the collection are skipped
    /// (they cannot be reached or completed).
    pub fn build(collection: &'a TaskCollection) -> Self {
        let tasks = collection.index();
        let mut graph: DiGraphMap<TaskId, ()> = DiGraphMap::new();

        for task in collection.iter() {
            graph.add_node(task.id);
        }

        for task in collection.iter() {
            for dep in task.dependencies.iter().copied() {
                if tasks.contains_key(&dep) {
                    graph.add_edge(task.id, dep, ());
                } else {
                    warn!(task = %task.id, dep = %dep, "dependency refers to a missing task; ignoring edge");
                }
            }
        }

        Self { tasks, graph }
    }

    pub fn task(&self, id: TaskId) -> Option<&'a Task> {
        self.tasks.get(&id).copied()
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Direct prerequisites of `id`, in declared order.
    pub fn prerequisites_of(&self, id: TaskId) -> Vec<TaskId> {
        match self.task(id) {
            Some(task) => task
                .dependencies
                .iter()
                .copied()
                .filter(|d| self.contains(*d))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Every task reachable from `id` through `dependencies`, excluding `id`
    /// itself, in depth-first discovery order.
    pub fn all_prerequisites_of(&self, id: TaskId) -> Vec<TaskId> {
        if !self.contains(id) {
            return Vec::new();
        }

        let mut found = Vec::new();
        let mut dfs = Dfs::new(&self.graph, id);
        while let Some(node) = dfs.next(&self.graph) {
            if node != id {
                found.push(node);
            }
        }
        found
    }

    /// Tasks that list `id` as a direct prerequisite.
    pub fn dependents_of(&self, id: TaskId) -> Vec<TaskId> {
        if !self.contains(id) {
            return Vec::new();
        }
        self.graph
            .neighbors_directed(id, Direction::Incoming)
            .collect()
    }

    /// Whether `to` can be reached from `from` by following dependency edges.
    ///
    /// A node always reaches itself.
    pub fn reaches(&self, from: TaskId, to: TaskId) -> bool {
        if !self.contains(from) || !self.contains(to) {
            return false;
        }
        has_path_connecting(&self.graph, from, to, None)
    }

    /// Shortest dependency chain `from -> ... -> to`, both ends included.
    pub fn path(&self, from: TaskId, to: TaskId) -> Option<Vec<TaskId>> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        astar(&self.graph, from, |n| n == to, |_| 1usize, |_| 0usize).map(|(_, path)| path)
    }
}
