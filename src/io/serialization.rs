//! Collection snapshot serialization and deserialization.
//!
//! The persisted shape is a list of `{id, timestamps: [{time, note}]}`.
//! Older snapshots stored each timestamp as a bare number; those are
//! upgraded when a snapshot is turned back into a [`Collection`], so nothing
//! past the load step ever sees the legacy form.
//!
//! Loading is tolerant per element: an unreadable timestamp or video is
//! dropped on its own and never takes the rest of the snapshot with it.

use crate::config::constants::MAX_VIDEOS;
use crate::error::{ReelmarksError, Result};
use crate::models::collection::Collection;
use crate::models::video::{Marker, VideoEntry};
use crate::util::video_id::is_valid_id;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// One persisted timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredMarker {
    Annotated {
        time: u64,
        #[serde(default)]
        note: String,
    },
    /// Bare offset written by older versions.
    Legacy(u64),
    /// Anything else found in a timestamp list (negative or fractional
    /// times, wrong types). Never written.
    Unreadable(serde_json::Value),
}

impl StoredMarker {
    fn into_marker(self) -> std::result::Result<Marker, serde_json::Value> {
        match self {
            StoredMarker::Annotated { time, note } => Ok(Marker::new(time, note)),
            StoredMarker::Legacy(time) => Ok(Marker::new(time, "")),
            StoredMarker::Unreadable(value) => Err(value),
        }
    }
}

/// One persisted video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredVideo {
    pub id: String,
    #[serde(default)]
    pub timestamps: Vec<StoredMarker>,
}

/// A snapshot list element, read leniently.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Video(StoredVideo),
    Unreadable(serde_json::Value),
}

/// Full collection snapshot as written to storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    pub videos: Vec<StoredVideo>,
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = Vec::<StoredEntry>::deserialize(deserializer)?;
        let videos = entries
            .into_iter()
            .filter_map(|entry| match entry {
                StoredEntry::Video(video) => Some(video),
                StoredEntry::Unreadable(value) => {
                    log::warn!("Dropping unreadable stored video: {}", value);
                    None
                }
            })
            .collect();
        Ok(Self { videos })
    }
}

impl Snapshot {
    /// Capture the current state of a collection.
    pub fn from_collection(collection: &Collection) -> Self {
        let videos = collection
            .videos()
            .iter()
            .map(|video| StoredVideo {
                id: video.id.clone(),
                timestamps: video
                    .markers()
                    .iter()
                    .map(|m| StoredMarker::Annotated {
                        time: m.offset_seconds,
                        note: m.note.clone(),
                    })
                    .collect(),
            })
            .collect();
        Self { videos }
    }

    /// Normalize a loaded snapshot into a collection.
    ///
    /// Legacy markers are upgraded. Entries that would break a collection
    /// invariant (bad or repeated id, repeated marker offset, too many
    /// videos) are dropped with a warning.
    pub fn into_collection(self) -> Collection {
        let mut entries: Vec<VideoEntry> = Vec::with_capacity(self.videos.len());

        for stored in self.videos {
            if !is_valid_id(&stored.id) {
                log::warn!("Dropping stored video with invalid id {:?}", stored.id);
                continue;
            }
            if entries.iter().any(|e| e.id == stored.id) {
                log::warn!("Dropping repeated stored video {}", stored.id);
                continue;
            }
            if entries.len() >= MAX_VIDEOS {
                log::warn!("Dropping stored video {} beyond the {} video limit", stored.id, MAX_VIDEOS);
                continue;
            }

            let mut entry = VideoEntry::new(stored.id);
            for stored_marker in stored.timestamps {
                let marker = match stored_marker.into_marker() {
                    Ok(marker) => marker,
                    Err(value) => {
                        log::warn!("Dropping unreadable marker {} on {}", value, entry.id);
                        continue;
                    }
                };
                let offset = marker.offset_seconds;
                if !entry.insert_marker(marker) {
                    log::warn!("Dropping repeated marker at {}s on {}", offset, entry.id);
                }
            }
            entries.push(entry);
        }

        Collection::from_entries(entries)
    }
}

/// Parse a snapshot from JSON text.
pub fn snapshot_from_json(json: &str) -> Result<Snapshot> {
    Ok(serde_json::from_str(json)?)
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

fn unsupported(extension: Option<&str>) -> ReelmarksError {
    ReelmarksError::InvalidInput(format!(
        "Unsupported file extension {:?}; use .json, .yaml or .yml",
        extension
    ))
}

/// Export to YAML or JSON depending on the file extension.
pub fn export_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let text = match extension(path) {
        Some("yaml") | Some("yml") => serde_yaml::to_string(snapshot)?,
        Some("json") => serde_json::to_string_pretty(snapshot)?,
        other => return Err(unsupported(other)),
    };
    std::fs::write(path, text)?;
    Ok(())
}

/// Import from YAML or JSON depending on the file extension.
///
/// The file is only read once the extension is known to be supported.
pub fn import_snapshot(path: &Path) -> Result<Snapshot> {
    match extension(path) {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&std::fs::read_to_string(path)?)?),
        Some("json") => snapshot_from_json(&std::fs::read_to_string(path)?),
        other => Err(unsupported(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_markers_upgraded() {
        let json = r#"[
            {"id": "dQw4w9WgXcQ", "timestamps": [120, {"time": 83, "note": "chorus"}, 5]},
            {"id": "aaaaaaaaaaa", "timestamps": [{"time": 7}]}
        ]"#;
        let collection = snapshot_from_json(json).unwrap().into_collection();

        let rick = collection.get("dQw4w9WgXcQ").unwrap();
        assert_eq!(
            rick.markers(),
            &[
                Marker::new(5, ""),
                Marker::new(83, "chorus"),
                Marker::new(120, ""),
            ]
        );
        assert_eq!(collection.get("aaaaaaaaaaa").unwrap().markers(), &[Marker::new(7, "")]);
    }

    #[test]
    fn test_persisted_vocabulary() {
        let mut collection = Collection::new();
        collection.add_video("dQw4w9WgXcQ").unwrap();
        collection.capture_marker("dQw4w9WgXcQ", 83, "chorus").unwrap();

        let json = serde_json::to_value(Snapshot::from_collection(&collection)).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"id": "dQw4w9WgXcQ", "timestamps": [{"time": 83, "note": "chorus"}]}
            ])
        );
    }

    #[test]
    fn test_repairs_broken_snapshot() {
        let mut videos = vec![
            StoredVideo { id: "bad id".into(), timestamps: vec![] },
            StoredVideo {
                id: "dQw4w9WgXcQ".into(),
                timestamps: vec![StoredMarker::Legacy(9), StoredMarker::Legacy(9)],
            },
            StoredVideo { id: "dQw4w9WgXcQ".into(), timestamps: vec![] },
        ];
        for i in 0..MAX_VIDEOS {
            videos.push(StoredVideo { id: format!("video{i:06}"), timestamps: vec![] });
        }

        let collection = Snapshot { videos }.into_collection();
        assert_eq!(collection.len(), MAX_VIDEOS);
        assert_eq!(collection.videos()[0].id, "dQw4w9WgXcQ");
        assert_eq!(collection.videos()[0].markers(), &[Marker::new(9, "")]);
    }

    #[test]
    fn test_unreadable_elements_are_dropped_alone() {
        let json = r#"[
            {"id": "dQw4w9WgXcQ", "timestamps": [{"time": 83, "note": "chorus"}]},
            {"id": "aaaaaaaaaaa", "timestamps": [{"time": -1, "note": "x"}, 12.5, "soon", 40]},
            {"timestamps": []},
            42,
            {"id": "bbbbbbbbbbb", "timestamps": "oops"}
        ]"#;
        let snapshot = snapshot_from_json(json).unwrap();
        assert_eq!(snapshot.videos.len(), 2);

        let collection = snapshot.into_collection();
        assert_eq!(
            collection.get("dQw4w9WgXcQ").unwrap().markers(),
            &[Marker::new(83, "chorus")]
        );
        assert_eq!(collection.get("aaaaaaaaaaa").unwrap().markers(), &[Marker::new(40, "")]);
        assert!(collection.get("bbbbbbbbbbb").is_none());
    }

    #[test]
    fn test_unreadable_snapshot_is_an_error() {
        assert!(matches!(
            snapshot_from_json("{not json"),
            Err(ReelmarksError::Json(_))
        ));
        assert!(snapshot_from_json(r#"{"id": "dQw4w9WgXcQ"}"#).is_err());
    }

    #[test]
    fn test_export_import_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = Collection::new();
        collection.add_video("dQw4w9WgXcQ").unwrap();
        collection.capture_marker("dQw4w9WgXcQ", 3725, "bridge").unwrap();
        let snapshot = Snapshot::from_collection(&collection);

        for name in ["marks.json", "marks.yaml"] {
            let path = dir.path().join(name);
            export_snapshot(&snapshot, &path).unwrap();
            assert_eq!(import_snapshot(&path).unwrap().into_collection(), collection);
        }

        let bad = dir.path().join("marks.txt");
        assert!(matches!(
            export_snapshot(&snapshot, &bad),
            Err(ReelmarksError::InvalidInput(_))
        ));
        assert!(!bad.exists());
        assert!(matches!(import_snapshot(&bad), Err(ReelmarksError::InvalidInput(_))));
    }
}
