// src/store/mod.rs

//! Persistence collaborator for task collections.
//!
//! A store is a key-value map from trip key to the latest [`Snapshot`] of that
//! trip's checklist. Each snapshot carries a revision; `save` only succeeds
//! when the caller read the revision it is replacing. This turns the classic
//! stale-read mistake (mutating an old copy and writing it back over newer
//! state) into a [`TripcheckError::StaleSnapshot`] instead of silent data
//! loss.

use std::fmt::{self, Debug, Display};

use crate::errors::{Result, TripcheckError};
use crate::task::TaskCollection;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Validated key naming one trip's checklist.
///
/// Restricted to ASCII letters, digits, `-` and `_` so it can double as a
/// file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripKey(String);

impl TripKey {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(TripcheckError::InvalidTripKey(key));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TripKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A trip's collection as last saved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    /// 0 for a trip that has never been saved.
    pub revision: u64,
    pub collection: TaskCollection,
}

/// Abstract snapshot storage.
pub trait CollectionStore: Send + Sync + Debug {
    /// Latest snapshot for `trip`; an unknown trip is an empty collection at
    /// revision 0.
    fn load(&self, trip: &TripKey) -> Result<Snapshot>;

    /// Replace the snapshot for `trip` and return the new revision.
    ///
    /// Fails with [`TripcheckError::StaleSnapshot`] if the stored revision is
    /// not `expected_revision`.
    fn save(&self, trip: &TripKey, expected_revision: u64, collection: &TaskCollection)
    -> Result<u64>;

    /// Keys of all stored trips, sorted.
    fn trips(&self) -> Result<Vec<TripKey>>;
}

pub(crate) fn check_revision(trip: &TripKey, expected: u64, actual: u64) -> Result<()> {
    if expected != actual {
        return Err(TripcheckError::StaleSnapshot {
            trip: trip.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}
