#![allow(dead_code)]

pub use tripcheck_test_utils::builders;
pub use tripcheck_test_utils::fakes;
pub use tripcheck_test_utils::init_tracing;

use chrono::Duration;
use tripcheck::manager::TaskManager;
use tripcheck::types::GatingDepth;

use crate::common::builders::base_time;
use crate::common::fakes::{FixedClock, SequentialIds};

/// Manager with a controllable clock (one hour after the builders' base time)
/// and ids starting at 100, so they never clash with builder ids.
pub fn test_manager(gating: GatingDepth) -> (TaskManager, FixedClock) {
    let clock = FixedClock::at(base_time() + Duration::hours(1));
    let manager = TaskManager::new(gating)
        .with_clock(clock.clone())
        .with_id_generator(SequentialIds::starting_at(100));
    (manager, clock)
}
