// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The ordered video collection.
//!
//! Insertion order is display order and maps one-to-one onto carousel
//! slots. Every operation validates before mutating, so a rejected call
//! leaves the collection exactly as it was.

use super::video::{Marker, VideoEntry};
use crate::config::constants::MAX_VIDEOS;
use crate::error::ReelmarksError;
use crate::util::timecode::format_seconds;
use crate::util::video_id::{extract_id, is_valid_id};
use thiserror::Error;

/// Why a video could not be added.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddError {
    #[error("This video is already in your gallery.")]
    AlreadyExists,
    #[error("Gallery limit of {} videos reached.", MAX_VIDEOS)]
    LimitReached,
    #[error("Not a valid video id.")]
    InvalidId,
}

/// Why a shared link did not produce a new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    AlreadyExists,
    LimitReached,
    InvalidUrl,
}

/// Result of ingesting an externally shared link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Added(String),
    Ignored(IgnoreReason),
}

/// The referenced video is no longer in the collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("video {0} is not in the gallery")]
pub struct NotFound(pub String);

/// Why a marker could not be captured.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("video {0} is not in the gallery")]
    NotFound(String),
    #[error("A timestamp already exists near {}.", near(.0))]
    DuplicateOffset(u64),
}

fn near(offset_seconds: &u64) -> String {
    format_seconds(*offset_seconds)
}

impl From<AddError> for ReelmarksError {
    fn from(err: AddError) -> Self {
        match err {
            AddError::AlreadyExists => ReelmarksError::DuplicateEntity(err.to_string()),
            AddError::LimitReached => ReelmarksError::CapacityExceeded { max: MAX_VIDEOS },
            AddError::InvalidId => ReelmarksError::InvalidInput(err.to_string()),
        }
    }
}

impl From<NotFound> for ReelmarksError {
    fn from(err: NotFound) -> Self {
        ReelmarksError::NotFound(err.0)
    }
}

impl From<CaptureError> for ReelmarksError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::NotFound(id) => ReelmarksError::NotFound(id),
            CaptureError::DuplicateOffset(_) => ReelmarksError::DuplicateEntity(err.to_string()),
        }
    }
}

/// Ordered, capacity-bounded list of tracked videos with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    videos: Vec<VideoEntry>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn videos(&self) -> &[VideoEntry] {
        &self.videos
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_full(&self) -> bool {
        self.videos.len() >= MAX_VIDEOS
    }

    pub fn get(&self, id: &str) -> Option<&VideoEntry> {
        self.videos.iter().find(|v| v.id == id)
    }

    /// Slot index of the video, which is also its carousel position.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.videos.iter().position(|v| v.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Append a new, marker-less entry.
    ///
    /// The capacity check runs first, so a full collection reports
    /// `LimitReached` even for an id it already holds.
    pub fn add_video(&mut self, id: &str) -> Result<(), AddError> {
        if self.is_full() {
            return Err(AddError::LimitReached);
        }
        if !is_valid_id(id) {
            return Err(AddError::InvalidId);
        }
        if self.contains(id) {
            return Err(AddError::AlreadyExists);
        }
        self.videos.push(VideoEntry::new(id));
        Ok(())
    }

    /// Add the video referenced by an externally shared link.
    ///
    /// Never fails; every input resolves to an outcome the caller can
    /// present to the user.
    pub fn ingest_shared_url(&mut self, raw_text: &str) -> IngestOutcome {
        let Some(id) = extract_id(raw_text) else {
            return IngestOutcome::Ignored(IgnoreReason::InvalidUrl);
        };
        match self.add_video(&id) {
            Ok(()) => IngestOutcome::Added(id),
            Err(AddError::AlreadyExists) => IngestOutcome::Ignored(IgnoreReason::AlreadyExists),
            Err(AddError::LimitReached) => IngestOutcome::Ignored(IgnoreReason::LimitReached),
            Err(AddError::InvalidId) => IngestOutcome::Ignored(IgnoreReason::InvalidUrl),
        }
    }

    /// Remove a video and all of its markers, returning the entry.
    pub fn remove_video(&mut self, id: &str) -> Result<VideoEntry, NotFound> {
        let index = self.position(id).ok_or_else(|| NotFound(id.to_string()))?;
        Ok(self.videos.remove(index))
    }

    /// Add a marker to a video, rejecting an offset that is already taken.
    pub fn capture_marker(
        &mut self,
        id: &str,
        offset_seconds: u64,
        note: &str,
    ) -> Result<(), CaptureError> {
        let video = self
            .videos
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| CaptureError::NotFound(id.to_string()))?;

        if video.insert_marker(Marker::new(offset_seconds, note)) {
            Ok(())
        } else {
            Err(CaptureError::DuplicateOffset(offset_seconds))
        }
    }

    /// Delete the marker(s) at `offset_seconds`; absent markers are not an
    /// error. Returns how many markers were removed.
    pub fn delete_marker(&mut self, id: &str, offset_seconds: u64) -> Result<usize, NotFound> {
        let video = self
            .videos
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| NotFound(id.to_string()))?;
        Ok(video.remove_markers_at(offset_seconds))
    }

    /// Build a collection from already-validated entries.
    pub(crate) fn from_entries(videos: Vec<VideoEntry>) -> Self {
        Self { videos }
    }
}
