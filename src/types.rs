// src/types.rs

use std::str::FromStr;

use serde::Deserialize;
use uuid::Uuid;

/// Canonical task identifier used throughout the crate.
///
/// Opaque and immutable once assigned; it is the node key of the dependency
/// graph.
pub type TaskId = Uuid;

/// How far the completion gate looks when deciding whether a task may be
/// marked complete.
///
/// - `Transitive`: every prerequisite reachable through `dependencies` must be
///   complete (default).
/// - `Direct`: only the task's own `dependencies` are inspected. Chains deeper
///   than one level are not enforced in this mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatingDepth {
    Transitive,
    Direct,
}

impl Default for GatingDepth {
    fn default() -> Self {
        GatingDepth::Transitive
    }
}

impl FromStr for GatingDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transitive" => Ok(GatingDepth::Transitive),
            "direct" => Ok(GatingDepth::Direct),
            other => Err(format!(
                "invalid gating depth: {other} (expected \"transitive\" or \"direct\")"
            )),
        }
    }
}
