// src/gate/mod.rs

//! Completion gate.
//!
//! - [`state`] holds the Incomplete/Complete state machine and the guard on
//!   the completing edge.
//! - [`status`] derives display facts (ready / blocked / done, totals).

pub mod state;
pub mod status;

pub use state::{CompletionState, Transition, check_transition, open_prerequisites};
pub use status::{Progress, TaskStatus, status_of};
