use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use tripcheck::manager::{Clock, IdGenerator};
use tripcheck::types::TaskId;
use uuid::Uuid;

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and advance the
/// clock that a `TaskManager` owns.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap();
        *guard += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Hands out `Uuid::from_u128(start)`, `start + 1`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: Arc<AtomicU64>,
}

impl SequentialIds {
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(start)),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> TaskId {
        Uuid::from_u128(self.next.fetch_add(1, Ordering::SeqCst) as u128)
    }
}

/// Always returns the same id; used to provoke the collision check.
#[derive(Debug, Clone, Copy)]
pub struct ConstantId(pub TaskId);

impl IdGenerator for ConstantId {
    fn next_id(&self) -> TaskId {
        self.0
    }
}
