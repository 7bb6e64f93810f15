// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::manager::TaskManager;
use crate::task::DEFAULT_CATEGORY;
use crate::types::GatingDepth;

/// Configuration as read from `Tripcheck.toml`, before validation.
///
/// ```toml
/// [store]
/// dir = ".tripcheck"
///
/// [tasks]
/// gating = "transitive"
/// default_category = "general"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub tasks: TasksSection,
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`
/// (or [`ConfigFile::default`]).
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub store: StoreSection,
    pub tasks: TasksSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(store: StoreSection, tasks: TasksSection) -> Self {
        Self { store, tasks }
    }

    /// A [`TaskManager`] configured from `[tasks]`.
    pub fn task_manager(&self) -> TaskManager {
        TaskManager::new(self.tasks.gating).with_default_category(self.tasks.default_category.clone())
    }
}

/// `[store]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSection {
    /// Directory holding one JSON snapshot per trip.
    ///
    /// Relative paths are resolved against the config file's directory.
    #[serde(default = "default_store_dir")]
    pub dir: PathBuf,
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(".tripcheck")
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
        }
    }
}

/// `[tasks]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TasksSection {
    /// `"transitive"` (default) or `"direct"`.
    #[serde(default)]
    pub gating: GatingDepth,

    /// Category for tasks added without one.
    #[serde(default = "default_category")]
    pub default_category: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Default for TasksSection {
    fn default() -> Self {
        Self {
            gating: GatingDepth::default(),
            default_category: default_category(),
        }
    }
}
