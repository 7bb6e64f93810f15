#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tripcheck::task::{Priority, Task, TaskCollection};
use tripcheck::types::TaskId;
use uuid::Uuid;

/// Deterministic id for test task number `n`.
pub fn id(n: u128) -> TaskId {
    Uuid::from_u128(n)
}

/// Fixed creation time used by the builders: 2026-01-01T00:00:00Z.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .expect("valid base time")
}

/// Builder for `Task` to simplify test setup.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(n: u128, text: &str) -> Self {
        Self {
            task: Task {
                id: id(n),
                text: text.to_string(),
                date: None,
                time: None,
                category: "general".to_string(),
                priority: Priority::Medium,
                completed: false,
                completed_at: None,
                created_at: base_time(),
                dependencies: vec![],
            },
        }
    }

    pub fn depends_on(mut self, n: u128) -> Self {
        self.task.dependencies.push(id(n));
        self
    }

    pub fn completed(mut self) -> Self {
        self.task.completed = true;
        self.task.completed_at = Some(base_time());
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.task.category = category.to_string();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.task.priority = priority;
        self
    }

    pub fn date(mut self, y: i32, m: u32, d: u32) -> Self {
        self.task.date = NaiveDate::from_ymd_opt(y, m, d);
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// Builder for `TaskCollection`.
pub struct CollectionBuilder {
    tasks: Vec<Task>,
}

impl CollectionBuilder {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn with(mut self, task: TaskBuilder) -> Self {
        self.tasks.push(task.build());
        self
    }

    pub fn build(self) -> TaskCollection {
        TaskCollection::from_tasks(self.tasks)
    }
}

impl Default for CollectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `A -> B -> C` ("A depends on B depends on C"), all incomplete.
pub fn chain_abc() -> TaskCollection {
    CollectionBuilder::new()
        .with(TaskBuilder::new(1, "A").depends_on(2))
        .with(TaskBuilder::new(2, "B").depends_on(3))
        .with(TaskBuilder::new(3, "C"))
        .build()
}
