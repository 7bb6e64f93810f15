// src/render.rs

//! Plain-text rendering for the CLI.

use std::fmt::Write;

use crate::gate::{Progress, TaskStatus, status_of};
use crate::task::{Task, TaskCollection};
use crate::types::{GatingDepth, TaskId};

/// First eight hex digits of an id; what the CLI shows and accepts as prefix.
pub fn short_id(id: TaskId) -> String {
    id.to_string().chars().take(8).collect()
}

/// One line per task plus a progress footer.
pub fn checklist(collection: &TaskCollection, depth: GatingDepth) -> String {
    let mut out = String::new();

    if collection.is_empty() {
        out.push_str("no tasks yet\n");
        return out;
    }

    for task in collection.iter() {
        let status = status_of(collection, task.id, depth);
        let _ = writeln!(out, "{}", task_line(task, status.as_ref()));
    }

    let p = Progress::of(collection, depth);
    let _ = writeln!(
        out,
        "{}/{} done, {} ready, {} blocked ({}%)",
        p.done,
        p.total,
        p.ready,
        p.blocked,
        p.percent_done()
    );
    out
}

/// Tasks prerequisites-first, numbered.
pub fn ordered(collection: &TaskCollection, order: &[TaskId]) -> String {
    let mut out = String::new();
    for (n, id) in order.iter().enumerate() {
        if let Some(task) = collection.get(*id) {
            let mark = if task.completed { "x" } else { " " };
            let _ = writeln!(out, "{:>3}. [{mark}] {}  {}", n + 1, short_id(task.id), task.text);
        }
    }
    out
}

fn task_line(task: &Task, status: Option<&TaskStatus>) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!(
        "[{mark}] {}  {}  ({}, {:?})",
        short_id(task.id),
        task.text,
        task.category,
        task.priority
    );

    match (task.date, task.time) {
        (Some(d), Some(t)) => {
            let _ = write!(line, "  {d} {}", t.format("%H:%M"));
        }
        (Some(d), None) => {
            let _ = write!(line, "  {d}");
        }
        (None, Some(t)) => {
            let _ = write!(line, "  {}", t.format("%H:%M"));
        }
        (None, None) => {}
    }

    if let Some(TaskStatus::Blocked { open }) = status {
        let ids: Vec<String> = open.iter().map(|id| short_id(*id)).collect();
        let _ = write!(line, "  blocked by {}", ids.join(", "));
    }

    line
}
