// src/store/json_file.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CollectionStore, Snapshot, TripKey, check_revision};
use crate::errors::Result;
use crate::task::TaskCollection;

/// On-disk envelope: `{"revision": n, "tasks": [...]}`.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSnapshot {
    revision: u64,
    tasks: TaskCollection,
}

/// One pretty-printed JSON file per trip: `<dir>/<trip>.json`.
///
/// Writes go to a temporary sibling file first and are renamed into place, so
/// a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, trip: &TripKey) -> PathBuf {
        self.dir.join(format!("{trip}.json"))
    }
}

impl CollectionStore for JsonFileStore {
    fn load(&self, trip: &TripKey) -> Result<Snapshot> {
        let path = self.path_for(trip);
        if !path.is_file() {
            debug!(trip = %trip, path = ?path, "no snapshot on disk; starting empty");
            return Ok(Snapshot::default());
        }

        let contents =
            fs::read_to_string(&path).with_context(|| format!("reading snapshot {:?}", path))?;
        let stored: StoredSnapshot = serde_json::from_str(&contents)?;

        Ok(Snapshot {
            revision: stored.revision,
            collection: stored.tasks,
        })
    }

    fn save(
        &self,
        trip: &TripKey,
        expected_revision: u64,
        collection: &TaskCollection,
    ) -> Result<u64> {
        let current = self.load(trip)?;
        check_revision(trip, expected_revision, current.revision)?;

        let stored = StoredSnapshot {
            revision: expected_revision + 1,
            tasks: collection.clone(),
        };
        let json = serde_json::to_string_pretty(&stored)?;

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating store dir {:?}", self.dir))?;

        let path = self.path_for(trip);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("writing snapshot {:?}", tmp))?;
        fs::rename(&tmp, &path).with_context(|| format!("replacing snapshot {:?}", path))?;

        debug!(trip = %trip, revision = stored.revision, tasks = collection.len(), "snapshot saved");
        Ok(stored.revision)
    }

    fn trips(&self) -> Result<Vec<TripKey>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut trips = Vec::new();
        for entry in fs::read_dir(&self.dir).with_context(|| format!("reading dir {:?}", self.dir))? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if let Ok(key) = TripKey::new(stem) {
                    trips.push(key);
                }
            }
        }
        trips.sort();
        Ok(trips)
    }
}
