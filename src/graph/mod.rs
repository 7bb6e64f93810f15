// src/graph/mod.rs

//! Dependency graph checks.
//!
//! - [`view`] builds a transient petgraph adjacency view of a collection.
//! - [`guard`] approves or rejects edge additions and deletions.
//! - [`validate`] checks whole collections read from storage and produces a
//!   prerequisites-first display order.

pub mod guard;
pub mod validate;
pub mod view;

pub use guard::{DeletePlan, EdgeDecision, check_add_edge, check_delete};
pub use validate::{suggested_order, validate_collection};
pub use view::DependencyView;
