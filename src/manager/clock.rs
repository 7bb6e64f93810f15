// src/manager/clock.rs

//! Time and id sources used by the manager.
//!
//! Production code uses [`SystemClock`] and [`UuidIds`]; tests swap in fixed
//! implementations (see the `tripcheck-test-utils` crate).

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::types::TaskId;

/// Source of "now" for `createdAt` / `completedAt`.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of fresh task ids.
///
/// Implementations must never hand out the same id twice; the manager treats
/// a collision as a bug and panics.
pub trait IdGenerator: Send + Sync + Debug {
    fn next_id(&self) -> TaskId;
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> TaskId {
        Uuid::new_v4()
    }
}
