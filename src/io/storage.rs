// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Snapshot persistence backends.
//!
//! Saves always replace the whole snapshot; there is a single writer, so
//! last write wins.

use super::serialization::{snapshot_from_json, Snapshot};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Local key/value-style storage for the collection snapshot.
pub trait SnapshotStore {
    /// Read the stored snapshot, `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>>;

    /// Replace the stored snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> Result<()>;

    /// Move an unreadable snapshot out of the way so the next save does not
    /// overwrite it. Returns where it went, `None` when there was nothing
    /// to keep.
    fn set_aside(&mut self) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}

/// Snapshot kept in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        if json.trim().is_empty() {
            return Ok(None);
        }
        snapshot_from_json(&json).map(Some)
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Write beside the target and rename so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string(snapshot)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn set_aside(&mut self) -> Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        // Never replace an earlier copy: collection.json.corrupt, .corrupt.1, ...
        let base = self.path.with_extension("json.corrupt");
        let mut target = base.clone();
        let mut n = 1;
        while target.exists() {
            target = PathBuf::from(format!("{}.{}", base.display(), n));
            n += 1;
        }
        std::fs::rename(&self.path, &target)?;
        Ok(Some(target))
    }
}

/// In-memory store for `--ephemeral` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<Snapshot>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saves performed so far.
    #[cfg(test)]
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::collection::Collection;

    #[test]
    fn test_file_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/collection.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested/collection.json"));

        let mut collection = Collection::new();
        collection.add_video("dQw4w9WgXcQ").unwrap();
        collection.capture_marker("dQw4w9WgXcQ", 83, "chorus").unwrap();
        store.save(&Snapshot::from_collection(&collection)).unwrap();

        let loaded = store.load().unwrap().unwrap().into_collection();
        assert_eq!(loaded, collection);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_reads_legacy_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collection.json");
        std::fs::write(&path, r#"[{"id":"dQw4w9WgXcQ","timestamps":[83]}]"#).unwrap();

        let collection = JsonFileStore::new(&path).load().unwrap().unwrap().into_collection();
        assert_eq!(collection.get("dQw4w9WgXcQ").unwrap().markers()[0].offset_seconds, 83);
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collection.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(JsonFileStore::new(&path).load().is_err());
    }

    #[test]
    fn test_file_store_set_aside_keeps_earlier_copies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collection.json");
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.set_aside().unwrap(), None);

        std::fs::write(&path, "{first").unwrap();
        let first = store.set_aside().unwrap().unwrap();
        assert_eq!(first, dir.path().join("collection.json.corrupt"));
        assert!(!path.exists());

        std::fs::write(&path, "{second").unwrap();
        let second = store.set_aside().unwrap().unwrap();
        assert_eq!(second, dir.path().join("collection.json.corrupt.1"));
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "{first");
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "{second");
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save(&Snapshot::default()).unwrap();
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.load().unwrap(), Some(Snapshot::default()));
    }
}
