// src/task/model.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::Rejection;
use crate::types::TaskId;

/// Category assigned when neither the caller nor the config names one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Display priority of a checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A single checklist task belonging to a trip.
///
/// Stored snapshots use camelCase keys (`completedAt`, `createdAt`) so they
/// stay readable by the planner's browser front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Prerequisites: ids of tasks this one depends on.
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Scheduling/display metadata supplied when a task is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    /// `None` falls back to the manager's default category.
    pub category: Option<String>,
    pub priority: Priority,
}

impl Task {
    /// Build a fresh, incomplete task with no dependencies.
    ///
    /// Fails with [`Rejection::Validation`] if `text` is empty or blank.
    pub fn new(
        id: TaskId,
        text: &str,
        fields: TaskFields,
        created_at: DateTime<Utc>,
    ) -> Result<Self, Rejection> {
        let text = normalize_text(text)?;
        let category = match fields.category {
            Some(c) if !c.trim().is_empty() => c.trim().to_string(),
            _ => default_category(),
        };

        Ok(Self {
            id,
            text,
            date: fields.date,
            time: fields.time,
            category,
            priority: fields.priority,
            completed: false,
            completed_at: None,
            created_at,
            dependencies: Vec::new(),
        })
    }

    /// Whether `other` is one of this task's direct prerequisites.
    pub fn depends_on(&self, other: TaskId) -> bool {
        self.dependencies.contains(&other)
    }

    /// Return a copy with the descriptive fields of `patch` applied.
    ///
    /// Completion state is never touched here.
    pub fn patched(&self, patch: &TaskPatch) -> Result<Self, Rejection> {
        let mut next = self.clone();

        if let Some(ref text) = patch.text {
            next.text = normalize_text(text)?;
        }
        if let Some(date) = patch.date {
            next.date = date;
        }
        if let Some(time) = patch.time {
            next.time = time;
        }
        if let Some(ref category) = patch.category {
            if category.trim().is_empty() {
                return Err(Rejection::Validation(
                    "category must not be blank".to_string(),
                ));
            }
            next.category = category.trim().to_string();
        }
        if let Some(priority) = patch.priority {
            next.priority = priority;
        }

        Ok(next)
    }

    pub(crate) fn mark_completed(&mut self, now: DateTime<Utc>) {
        self.completed = true;
        self.completed_at = Some(now);
    }

    pub(crate) fn mark_incomplete(&mut self) {
        self.completed = false;
        self.completed_at = None;
    }
}

fn normalize_text(text: &str) -> Result<String, Rejection> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Rejection::Validation(
            "task text must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Partial update of a task's descriptive fields.
///
/// Completion (`completed`, `completedAt`), identity and dependencies are not
/// part of a patch; they change only through their dedicated operations.
/// `date` and `time` use a double option so a patch can clear them
/// (`"date": null`) as well as leave them alone (key absent). `text` and
/// `category` cannot be cleared, so an explicit `null` for them is refused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskPatch {
    #[serde(default, deserialize_with = "not_null")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "present")]
    pub time: Option<Option<NaiveTime>>,
    #[serde(default, deserialize_with = "not_null")]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl TaskPatch {
    /// Parse a patch coming from the UI layer.
    ///
    /// Unknown keys, including attempts to set `completed` or `completedAt`
    /// directly, are refused.
    pub fn from_json(json: &str) -> Result<Self, Rejection> {
        serde_json::from_str(json)
            .map_err(|e| Rejection::Validation(format!("malformed task patch: {e}")))
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn time(mut self, time: Option<NaiveTime>) -> Self {
        self.time = Some(time);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.category.is_none()
            && self.priority.is_none()
    }
}

// A key that is present (even as `null`) becomes `Some(..)`.
fn present<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

// Absent keys fall back to `None` via `#[serde(default)]`; `null` is an error.
fn not_null<'de, T, D>(de: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(de).map(Some)
}
