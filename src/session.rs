// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session controller.
//!
//! Owns the collection store, the player registry and the carousel gesture
//! controller, and exposes the intents the render layer calls. The render
//! layer never mutates state directly; it calls an intent and redraws from
//! what the session reports.

use crate::carousel::gesture::{GestureController, GestureResponse, PointerDown, RingUpdate};
use crate::config::constants::{LIMIT_NOTICE_DURATION, MAX_VIDEOS};
use crate::error::{ReelmarksError, Result};
use crate::io::serialization::{export_snapshot, import_snapshot};
use crate::launch::LaunchAddress;
use crate::models::collection::{Collection, IgnoreReason, IngestOutcome};
use crate::models::store::{Change, CollectionStore};
use crate::playback::PlayerRegistry;
use crate::share::{share_marker, ShareOutcome, ShareTarget};
use crate::util::timecode::{format_seconds, parse_time_expression, round_to_second};
use crate::util::video_id::extract_id;
use std::path::Path;
use std::time::Duration;

/// Text input and confirmation supplied by the host.
///
/// Hosts with modal dialogs answer from the dialog's result once the user
/// has closed it.
pub trait UserPrompt {
    /// Ask for free text; `None` when the user cancels.
    fn request_text(&mut self, message: &str) -> Option<String>;
    fn confirm(&mut self, message: &str) -> bool;
}

pub const DELETE_VIDEO_CONFIRMATION: &str =
    "Are you sure you want to delete this video and all its saved timestamps?";

/// A capture waiting for the user's note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCapture {
    pub video_id: String,
    pub offset_seconds: u64,
}

impl PendingCapture {
    /// Prompt shown while asking for the note.
    pub fn prompt(&self) -> String {
        format!(
            "Capturing time: {}. Enter your note:",
            format_seconds(self.offset_seconds)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    Captured(u64),
    /// The user dismissed the note prompt; nothing changed.
    Cancelled,
}

/// How prominently a notice is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
    /// Full-width banner that dismisses itself.
    Banner,
}

/// User-facing feedback for an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    /// Auto-dismiss after this long; `None` stays until replaced.
    pub lifetime: Option<Duration>,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
            lifetime: None,
        }
    }

    fn limit_banner() -> Self {
        Self {
            level: NoticeLevel::Banner,
            text: format!(
                "Gallery Full! Max of {} videos reached. Please delete one to add a new video.",
                MAX_VIDEOS
            ),
            lifetime: Some(LIMIT_NOTICE_DURATION),
        }
    }

    /// Notice for a failed operation, `None` for failures shown silently.
    pub fn from_error(err: &ReelmarksError) -> Option<Self> {
        match err {
            ReelmarksError::NotFound(_) => None,
            ReelmarksError::CapacityExceeded { .. } => Some(Self::limit_banner()),
            other => Some(Self {
                level: NoticeLevel::Error,
                text: other.to_string(),
                lifetime: None,
            }),
        }
    }

    /// Notice for an ingestion outcome. Only a full collection is worth a
    /// notice, since the user may not have started the share themselves.
    pub fn from_ingest(outcome: &IngestOutcome) -> Option<Self> {
        match outcome {
            IngestOutcome::Ignored(IgnoreReason::LimitReached) => Some(Self::limit_banner()),
            _ => None,
        }
    }
}

pub struct Session {
    store: CollectionStore,
    players: PlayerRegistry,
    gesture: GestureController,
    ring_updates: Vec<RingUpdate>,
}

impl Session {
    pub fn new(store: CollectionStore, players: PlayerRegistry) -> Self {
        let mut session = Self {
            store,
            players,
            gesture: GestureController::new(),
            ring_updates: Vec::new(),
        };
        session.apply_changes();
        session
    }

    pub fn collection(&self) -> &Collection {
        self.store.collection()
    }

    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut PlayerRegistry {
        &mut self.players
    }

    /// Ring updates caused by structural changes since the last call.
    pub fn take_ring_updates(&mut self) -> Vec<RingUpdate> {
        std::mem::take(&mut self.ring_updates)
    }

    /// Consume the shared link on the launch address, if any.
    pub fn ingest_launch(&mut self, launch: &mut LaunchAddress) -> Option<IngestOutcome> {
        let shared = launch.take_shared_url()?;
        Some(self.on_ingest_shared_url(&shared))
    }

    pub fn on_ingest_shared_url(&mut self, raw_text: &str) -> IngestOutcome {
        let outcome = self.store.ingest_shared_url(raw_text);
        self.apply_changes();
        outcome
    }

    /// Add a video from a link or bare id typed by the user.
    pub fn on_add_video(&mut self, input: &str) -> Result<String> {
        if self.collection().is_full() {
            return Err(ReelmarksError::CapacityExceeded { max: MAX_VIDEOS });
        }
        let id = extract_id(input).ok_or_else(|| {
            ReelmarksError::InvalidInput(
                "Please enter a valid YouTube URL or 11-character ID.".to_string(),
            )
        })?;
        self.store.add_video(&id)?;
        self.apply_changes();
        Ok(id)
    }

    /// Ask for confirmation, then delete. Returns whether a video was deleted.
    pub fn on_delete_video(&mut self, id: &str, prompt: &mut dyn UserPrompt) -> Result<bool> {
        if !prompt.confirm(DELETE_VIDEO_CONFIRMATION) {
            return Ok(false);
        }
        self.store.remove_video(id)?;
        self.apply_changes();
        Ok(true)
    }

    /// First half of a capture: read and round the player position.
    pub fn request_capture(&self, id: &str) -> Result<PendingCapture> {
        if !self.collection().contains(id) {
            return Err(ReelmarksError::NotFound(id.to_string()));
        }
        let position = self.players.current_time(id)?;
        Ok(PendingCapture {
            video_id: id.to_string(),
            offset_seconds: round_to_second(position),
        })
    }

    /// Second half of a capture: ask for the note and store the marker.
    ///
    /// A cancelled prompt changes nothing. On success the video's player is
    /// paused.
    pub fn complete_capture(
        &mut self,
        pending: &PendingCapture,
        prompt: &mut dyn UserPrompt,
    ) -> Result<CaptureOutcome> {
        let Some(note) = prompt.request_text(&pending.prompt()) else {
            return Ok(CaptureOutcome::Cancelled);
        };
        self.store
            .capture_marker(&pending.video_id, pending.offset_seconds, note.trim())?;
        self.players.pause(&pending.video_id);
        self.apply_changes();
        Ok(CaptureOutcome::Captured(pending.offset_seconds))
    }

    /// Add a marker from a typed time expression such as `"1:23 chorus"`.
    pub fn on_manual_marker(&mut self, id: &str, expression: &str) -> Result<u64> {
        let parsed = parse_time_expression(expression).ok_or_else(|| {
            ReelmarksError::InvalidInput(format!(
                "Could not read a time from {:?}; use H:MM:SS, M:SS or seconds.",
                expression.trim()
            ))
        })?;
        self.store
            .capture_marker(id, parsed.seconds, &parsed.note)?;
        self.apply_changes();
        Ok(parsed.seconds)
    }

    pub fn on_delete_marker(&mut self, id: &str, offset_seconds: u64) -> Result<()> {
        self.store.delete_marker(id, offset_seconds)?;
        self.apply_changes();
        Ok(())
    }

    /// Jump a video to a marker and play it, pausing every other player.
    pub fn on_seek(&mut self, id: &str, offset_seconds: u64) -> Result<()> {
        if !self.collection().contains(id) {
            return Err(ReelmarksError::NotFound(id.to_string()));
        }
        self.players.seek_and_play(id, offset_seconds)
    }

    /// Share a marker's deep link with its note.
    pub fn on_share(
        &self,
        id: &str,
        offset_seconds: u64,
        target: &mut dyn ShareTarget,
    ) -> Result<ShareOutcome> {
        let marker = self
            .collection()
            .get(id)
            .and_then(|video| {
                video
                    .markers()
                    .iter()
                    .find(|m| m.offset_seconds == offset_seconds)
            })
            .ok_or_else(|| ReelmarksError::NotFound(format!("{id}@{offset_seconds}")))?;
        Ok(share_marker(target, id, offset_seconds, &marker.note))
    }

    pub fn on_drag_start(&mut self, down: PointerDown) -> GestureResponse {
        self.gesture.pointer_down(down)
    }

    pub fn on_drag_move(&mut self, x: f64, y: f64) -> GestureResponse {
        self.gesture.pointer_move(x, y)
    }

    pub fn on_drag_end(&mut self, x: f64) -> GestureResponse {
        self.gesture.pointer_up(x)
    }

    /// Write the collection to a YAML or JSON file.
    pub fn export_to(&self, path: &Path) -> Result<()> {
        export_snapshot(&self.store.snapshot(), path)?;
        log::info!("Exported gallery to {}", path.display());
        Ok(())
    }

    /// Replace the collection from a YAML or JSON file.
    pub fn import_from(&mut self, path: &Path) -> Result<()> {
        let snapshot = import_snapshot(path)?;
        self.store.replace(snapshot);
        self.apply_changes();
        log::info!("Imported gallery from {}", path.display());
        Ok(())
    }

    /// Bring players and the ring in line with queued store changes.
    fn apply_changes(&mut self) {
        let mut structural = false;
        for change in self.store.take_changes() {
            match change {
                Change::VideoAdded { id, .. } => {
                    self.players.ensure(&id);
                    structural = true;
                }
                Change::VideoRemoved { id, .. } => {
                    self.players.release(&id);
                    structural = true;
                }
                Change::Replaced => {
                    let ids: Vec<String> = self
                        .collection()
                        .videos()
                        .iter()
                        .map(|v| v.id.clone())
                        .collect();
                    self.players.sync(ids.iter().map(String::as_str));
                    structural = true;
                }
                Change::MarkersChanged { .. } => {}
            }
        }
        if structural {
            let update = self.gesture.set_slot_count(self.collection().len());
            self.ring_updates.push(update);
        }
    }
}
