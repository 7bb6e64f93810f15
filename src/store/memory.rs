// src/store/memory.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;

use super::{CollectionStore, Snapshot, TripKey, check_revision};
use crate::errors::Result;
use crate::task::TaskCollection;

/// In-process store. Clones share the same underlying map, so a test can keep
/// a handle and inspect what a [`crate::board::TripBoard`] saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshots: Arc<Mutex<HashMap<TripKey, Snapshot>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a trip with a collection at revision 1.
    pub fn with_trip(self, trip: &TripKey, collection: TaskCollection) -> Result<Self> {
        self.lock()?.insert(
            trip.clone(),
            Snapshot {
                revision: 1,
                collection,
            },
        );
        Ok(self)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<TripKey, Snapshot>>> {
        Ok(self
            .snapshots
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?)
    }
}

impl CollectionStore for MemoryStore {
    fn load(&self, trip: &TripKey) -> Result<Snapshot> {
        Ok(self.lock()?.get(trip).cloned().unwrap_or_default())
    }

    fn save(
        &self,
        trip: &TripKey,
        expected_revision: u64,
        collection: &TaskCollection,
    ) -> Result<u64> {
        let mut snapshots = self.lock()?;
        let actual = snapshots.get(trip).map(|s| s.revision).unwrap_or(0);
        check_revision(trip, expected_revision, actual)?;

        let revision = expected_revision + 1;
        snapshots.insert(
            trip.clone(),
            Snapshot {
                revision,
                collection: collection.clone(),
            },
        );
        Ok(revision)
    }

    fn trips(&self) -> Result<Vec<TripKey>> {
        let mut trips: Vec<TripKey> = self.lock()?.keys().cloned().collect();
        trips.sort();
        Ok(trips)
    }
}
