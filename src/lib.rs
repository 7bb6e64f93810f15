// src/lib.rs

pub mod board;
pub mod cli;
pub mod config;
pub mod errors;
pub mod gate;
pub mod graph;
pub mod logging;
pub mod manager;
pub mod render;
pub mod store;
pub mod task;
pub mod types;

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::debug;

use crate::board::{BoardOutcome, TaskCommand, TripBoard};
use crate::cli::{CliArgs, Command, DepCmd, EditArgs};
use crate::config::{ConfigFile, load_or_default};
use crate::graph::suggested_order;
use crate::store::{CollectionStore, JsonFileStore, TripKey};
use crate::task::{TaskCollection, TaskFields, TaskPatch};
use crate::types::TaskId;

/// How the process should exit after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    /// The command was refused (cycle, open prerequisites, ...). Nothing was
    /// written.
    Rejected,
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the JSON snapshot store
/// - a [`TripBoard`] for the selected trip
/// - rendering of results and rejections
pub fn run(args: CliArgs) -> Result<Exit> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_or_default(&config_path)?;

    let store = JsonFileStore::new(store_dir(&config_path, &cfg));
    let trip = TripKey::new(&args.trip)?;
    let board = TripBoard::new(store, trip, cfg.task_manager());
    debug!(trip = %board.trip(), dir = ?board.store().dir(), "board ready");

    let snapshot = board.snapshot()?;
    let collection = &snapshot.collection;
    let gating = board.manager().gating();

    let command = match args.command {
        Command::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(collection)?);
            } else {
                print!("{}", render::checklist(collection, gating));
            }
            return Ok(Exit::Success);
        }
        Command::Order => {
            let order = suggested_order(collection)?;
            print!("{}", render::ordered(collection, &order));
            return Ok(Exit::Success);
        }
        Command::Trips => {
            for trip in board.store().trips()? {
                println!("{trip}");
            }
            return Ok(Exit::Success);
        }
        Command::Add(add) => TaskCommand::Add {
            text: add.text,
            fields: TaskFields {
                date: add.date,
                time: add.time,
                category: add.category,
                priority: add.priority.into(),
            },
        },
        Command::Edit(edit) => TaskCommand::Edit {
            id: resolve_id(collection, &edit.id)?,
            patch: patch_from_args(&edit)?,
        },
        Command::Done { id } => TaskCommand::ToggleCompletion {
            id: resolve_id(collection, &id)?,
        },
        Command::Dep { cmd: DepCmd::Add { id, on } } => TaskCommand::AddDependency {
            id: resolve_id(collection, &id)?,
            depends_on: resolve_id(collection, &on)?,
        },
        Command::Dep { cmd: DepCmd::Rm { id, on } } => TaskCommand::RemoveDependency {
            id: resolve_id(collection, &id)?,
            depends_on: resolve_id(collection, &on)?,
        },
        Command::Rm { id, yes } => TaskCommand::Delete {
            id: resolve_id(collection, &id)?,
            confirmed: yes,
        },
    };

    let is_add = matches!(command, TaskCommand::Add { .. });

    match board.apply(command)? {
        BoardOutcome::Applied {
            revision,
            collection,
        } => {
            if is_add {
                if let Some(task) = collection.tasks().last() {
                    println!("added {}  {}", render::short_id(task.id), task.text);
                }
            }
            println!("ok (revision {revision})");
            Ok(Exit::Success)
        }
        BoardOutcome::Rejected(rejection) => {
            eprintln!("rejected: {rejection}");
            if rejection.needs_confirmation() {
                eprintln!("re-run with --yes to delete it anyway");
            }
            Ok(Exit::Rejected)
        }
    }
}

/// Relative store directories are taken relative to the config file.
///
/// - If the config path has a non-empty parent (e.g. "trips/Tripcheck.toml"),
///   we use that directory.
/// - A bare filename like "Tripcheck.toml" resolves against the current
///   working directory.
pub fn store_dir(config_path: &Path, cfg: &ConfigFile) -> PathBuf {
    if cfg.store.dir.is_absolute() {
        return cfg.store.dir.clone();
    }
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(&cfg.store.dir),
        _ => cfg.store.dir.clone(),
    }
}

/// Resolve a full id or a unique id prefix against the collection.
///
/// A full id that is not in the collection is passed through, so the manager
/// reports it as `TaskNotFound`. Blank input never matches.
pub fn resolve_id(collection: &TaskCollection, input: &str) -> Result<TaskId> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        bail!("task id must not be empty");
    }
    if let Ok(id) = input.parse::<TaskId>() {
        return Ok(id);
    }

    let matches: Vec<TaskId> = collection
        .ids()
        .filter(|id| id.to_string().starts_with(&input))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no task matches id '{input}'"),
        many => bail!("id prefix '{input}' is ambiguous ({} tasks match)", many.len()),
    }
}

fn patch_from_args(edit: &EditArgs) -> Result<TaskPatch> {
    if let Some(ref json) = edit.patch {
        return Ok(TaskPatch::from_json(json)?);
    }

    let mut patch = TaskPatch::default();
    if let Some(ref text) = edit.text {
        patch = patch.text(text.clone());
    }
    if let Some(ref category) = edit.category {
        patch = patch.category(category.clone());
    }
    if let Some(priority) = edit.priority {
        patch = patch.priority(priority.into());
    }
    if edit.date.is_some() || edit.clear_date {
        patch = patch.date(edit.date);
    }
    if edit.time.is_some() || edit.clear_time {
        patch = patch.time(edit.time);
    }

    if patch.is_empty() {
        bail!("nothing to edit; pass at least one field");
    }
    Ok(patch)
}
