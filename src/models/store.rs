// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Collection store: the collection plus persistence and change
//! notifications.
//!
//! Every successful mutation saves a full snapshot and queues a [`Change`]
//! for the render layer. Rejected operations do neither.

use super::collection::{AddError, CaptureError, Collection, IngestOutcome, NotFound};
use crate::io::serialization::Snapshot;
use crate::io::storage::SnapshotStore;

/// Change notification consumed by the render layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    VideoAdded { id: String, slot: usize },
    VideoRemoved { id: String, slot: usize },
    MarkersChanged { id: String },
    /// The whole collection was replaced (load or import).
    Replaced,
}

/// Owns the collection and its persistence backend.
pub struct CollectionStore {
    collection: Collection,
    storage: Box<dyn SnapshotStore>,
    /// Cleared when an unreadable snapshot could not be moved aside.
    persist: bool,
    pending: Vec<Change>,
}

impl CollectionStore {
    /// Load the stored snapshot, starting empty when there is none or it
    /// cannot be read.
    ///
    /// An unreadable snapshot is moved aside before anything is saved. If
    /// that fails the session runs without saving rather than overwrite it.
    pub fn open(mut storage: Box<dyn SnapshotStore>) -> Self {
        let mut persist = true;
        let collection = match storage.load() {
            Ok(Some(snapshot)) => snapshot.into_collection(),
            Ok(None) => Collection::new(),
            Err(e) => {
                log::error!("Failed to load saved gallery: {}", e);
                match storage.set_aside() {
                    Ok(Some(path)) => {
                        log::warn!("Unreadable gallery kept at {}", path.display());
                    }
                    Ok(None) => {}
                    Err(e) => {
                        log::error!("Could not keep unreadable gallery, saving disabled: {}", e);
                        persist = false;
                    }
                }
                Collection::new()
            }
        };
        log::info!("Loaded gallery with {} videos", collection.len());

        Self {
            collection,
            storage,
            persist,
            pending: vec![Change::Replaced],
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Drain queued change notifications.
    pub fn take_changes(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.pending)
    }

    pub fn add_video(&mut self, id: &str) -> Result<(), AddError> {
        self.collection.add_video(id).inspect_err(|e| {
            log::debug!("Rejected add of {}: {:?}", id, e);
        })?;
        log::info!("Added video {}, total: {}", id, self.collection.len());
        let slot = self.collection.len() - 1;
        self.commit(Change::VideoAdded {
            id: id.to_string(),
            slot,
        });
        Ok(())
    }

    pub fn ingest_shared_url(&mut self, raw_text: &str) -> IngestOutcome {
        let outcome = self.collection.ingest_shared_url(raw_text);
        match &outcome {
            IngestOutcome::Added(id) => {
                log::info!("Ingested shared video {}, total: {}", id, self.collection.len());
                let slot = self.collection.len() - 1;
                self.commit(Change::VideoAdded {
                    id: id.clone(),
                    slot,
                });
            }
            IngestOutcome::Ignored(reason) => {
                log::warn!("Ignored shared link {:?}: {:?}", raw_text, reason);
            }
        }
        outcome
    }

    pub fn remove_video(&mut self, id: &str) -> Result<(), NotFound> {
        let slot = self.collection.position(id).ok_or_else(|| NotFound(id.to_string()))?;
        self.collection.remove_video(id)?;
        log::info!("Removed video {}, total: {}", id, self.collection.len());
        self.commit(Change::VideoRemoved {
            id: id.to_string(),
            slot,
        });
        Ok(())
    }

    pub fn capture_marker(
        &mut self,
        id: &str,
        offset_seconds: u64,
        note: &str,
    ) -> Result<(), CaptureError> {
        self.collection
            .capture_marker(id, offset_seconds, note)
            .inspect_err(|e| log::debug!("Rejected marker on {}: {:?}", id, e))?;
        log::info!("Captured marker at {}s on {}", offset_seconds, id);
        self.commit(Change::MarkersChanged { id: id.to_string() });
        Ok(())
    }

    pub fn delete_marker(&mut self, id: &str, offset_seconds: u64) -> Result<(), NotFound> {
        let removed = self.collection.delete_marker(id, offset_seconds)?;
        if removed > 0 {
            log::info!("Deleted marker at {}s on {}", offset_seconds, id);
            self.commit(Change::MarkersChanged { id: id.to_string() });
        }
        Ok(())
    }

    /// Replace the whole collection with an imported snapshot.
    pub fn replace(&mut self, snapshot: Snapshot) {
        self.collection = snapshot.into_collection();
        log::info!("Replaced gallery, total: {}", self.collection.len());
        self.commit(Change::Replaced);
    }

    /// Current state as a snapshot (for export).
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_collection(&self.collection)
    }

    fn commit(&mut self, change: Change) {
        // A failed save keeps the in-memory state; the next mutation retries
        // with the full snapshot.
        if !self.persist {
            log::warn!("Saving disabled, change kept in memory only");
        } else if let Err(e) = self.storage.save(&self.snapshot()) {
            log::error!("Failed to save gallery: {}", e);
        }
        self.pending.push(change);
    }
}
