// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tracked videos and their time markers.

use crate::util::timecode::format_seconds;

/// A named point in a video, stored at whole-second precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub offset_seconds: u64,
    pub note: String,
}

impl Marker {
    /// Create a marker at `offset_seconds` with the given note.
    pub fn new(offset_seconds: u64, note: impl Into<String>) -> Self {
        Self {
            offset_seconds,
            note: note.into(),
        }
    }

    /// Display label for the marker's offset.
    pub fn label(&self) -> String {
        format_seconds(self.offset_seconds)
    }
}

/// A bookmarked video.
///
/// Markers are kept sorted by ascending offset and no two share an offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEntry {
    pub id: String,
    markers: Vec<Marker>,
}

impl VideoEntry {
    /// Create an entry with no markers.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            markers: Vec::new(),
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Check whether a marker exists at exactly `offset_seconds`.
    pub fn has_marker_at(&self, offset_seconds: u64) -> bool {
        self.markers
            .iter()
            .any(|m| m.offset_seconds == offset_seconds)
    }

    /// Insert a marker, keeping the list sorted.
    ///
    /// Returns `false` without touching the list when the offset is taken.
    pub fn insert_marker(&mut self, marker: Marker) -> bool {
        if self.has_marker_at(marker.offset_seconds) {
            return false;
        }
        self.markers.push(marker);
        self.markers.sort_by_key(|m| m.offset_seconds);
        true
    }

    /// Remove every marker at `offset_seconds`, returning how many went.
    pub fn remove_markers_at(&mut self, offset_seconds: u64) -> usize {
        let before = self.markers.len();
        self.markers.retain(|m| m.offset_seconds != offset_seconds);
        before - self.markers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(entry: &VideoEntry) -> Vec<u64> {
        entry.markers().iter().map(|m| m.offset_seconds).collect()
    }

    #[test]
    fn test_insert_keeps_sorted() {
        let mut entry = VideoEntry::new("dQw4w9WgXcQ");
        for offset in [90, 5, 300, 42, 0, 61] {
            assert!(entry.insert_marker(Marker::new(offset, "")));
            let current = offsets(&entry);
            let mut sorted = current.clone();
            sorted.sort_unstable();
            assert_eq!(current, sorted);
        }
        assert_eq!(offsets(&entry), vec![0, 5, 42, 61, 90, 300]);
    }

    #[test]
    fn test_duplicate_offset_rejected() {
        let mut entry = VideoEntry::new("dQw4w9WgXcQ");
        assert!(entry.insert_marker(Marker::new(83, "chorus")));
        assert!(!entry.insert_marker(Marker::new(83, "again")));
        assert_eq!(entry.markers(), &[Marker::new(83, "chorus")]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut entry = VideoEntry::new("dQw4w9WgXcQ");
        entry.insert_marker(Marker::new(10, "a"));
        entry.insert_marker(Marker::new(20, "b"));
        assert_eq!(entry.remove_markers_at(10), 1);
        assert_eq!(entry.remove_markers_at(10), 0);
        assert_eq!(offsets(&entry), vec![20]);
    }

    #[test]
    fn test_marker_label() {
        assert_eq!(Marker::new(83, "chorus").label(), "1:23");
    }
}
