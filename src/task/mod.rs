// src/task/mod.rs

//! Task records and the ordered collection they live in.
//!
//! - [`model`] defines [`Task`], its creation-time validation and the
//!   [`TaskPatch`] used for descriptive edits.
//! - [`collection`] holds the ordered [`TaskCollection`].

pub mod collection;
pub mod model;

pub use collection::TaskCollection;
pub use model::{DEFAULT_CATEGORY, Priority, Task, TaskFields, TaskPatch};
