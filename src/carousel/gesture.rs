// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Gesture controller for the carousel.
//!
//! Consumes pointer events and turns horizontal drags into ring rotation.
//! The controller owns the settled rotation; while a drag is in progress it
//! only reports preview angles and commits nothing until release.
//!
//! ```text
//! Idle --down (free area)--> Dragging --up--> Idle (snap + settle)
//! Idle --down (control)----> Suppressed --up--> Idle
//! Dragging --vertical scroll over list--> Suppressed
//! ```

use super::geometry::{drag_preview, quantize, snap};
use crate::config::constants::{SCROLL_THRESHOLD, SENSITIVITY, SETTLE_TRANSITION};
use std::time::Duration;

/// Where a pointer gesture comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// A pointer going down, with what it landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerDown {
    pub x: f64,
    pub y: f64,
    pub source: PointerSource,
    /// Landed on a button, input or embedded player.
    pub on_control: bool,
    /// Landed inside a vertically scrollable list.
    pub over_scroll_list: bool,
}

/// State of an in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    pub anchor_x: f64,
    pub anchor_y: f64,
    /// Settled rotation when the drag began.
    pub base_rotation: f64,
    pub source: PointerSource,
    over_scroll_list: bool,
    /// Horizontal travel has passed the threshold; vertical scrolling can
    /// no longer claim the gesture.
    horizontal_locked: bool,
    last_x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Dragging(GestureSession),
    /// The gesture belongs to someone else (a control or a vertical scroll).
    Suppressed,
}

/// What the render layer should do with the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingUpdate {
    /// Show this angle immediately, with no transition.
    Track(f64),
    /// Animate to this angle over `transition`.
    Settle { rotation: f64, transition: Duration },
}

/// Mouse drags need move/up events from the whole window, not just the
/// carousel, so a drag that leaves the ring is still followed to release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerCapture {
    Acquire,
    Release,
}

/// Side effects requested by a single event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureResponse {
    pub ring: Option<RingUpdate>,
    /// Suppress the host's default scrolling for this event.
    pub block_scroll: bool,
    pub capture: Option<PointerCapture>,
}

/// Carousel gesture state machine.
#[derive(Debug, Clone)]
pub struct GestureController {
    state: GestureState,
    rotation: f64,
    slot_count: usize,
    sensitivity: f64,
    threshold: f64,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureController {
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
            rotation: 0.0,
            slot_count: 0,
            sensitivity: SENSITIVITY,
            threshold: SCROLL_THRESHOLD,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// The settled rotation (never a mid-animation or preview value).
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Track a structural change in the collection.
    ///
    /// The ring resets to 0 when empty and otherwise re-aligns to the nearest
    /// slot boundary for the new count, so existing cards stay roughly where
    /// they were.
    pub fn set_slot_count(&mut self, slot_count: usize) -> RingUpdate {
        self.slot_count = slot_count;
        self.rotation = if slot_count == 0 {
            0.0
        } else {
            quantize(self.rotation, slot_count)
        };
        log::debug!("Carousel has {} slots, rotation {}", slot_count, self.rotation);
        RingUpdate::Track(self.rotation)
    }

    pub fn pointer_down(&mut self, down: PointerDown) -> GestureResponse {
        let mut response = GestureResponse::default();

        // Only one anchor is held: a second press ends the previous drag.
        if let GestureState::Dragging(session) = self.state {
            log::debug!("Pointer down during drag, settling previous drag");
            self.finish_drag(&session, session.last_x);
            if session.source == PointerSource::Mouse {
                response.capture = Some(PointerCapture::Release);
            }
        }

        if down.on_control {
            self.state = GestureState::Suppressed;
            return response;
        }

        self.state = GestureState::Dragging(GestureSession {
            anchor_x: down.x,
            anchor_y: down.y,
            base_rotation: self.rotation,
            source: down.source,
            over_scroll_list: down.over_scroll_list,
            horizontal_locked: false,
            last_x: down.x,
        });
        log::debug!("Drag started at ({}, {}), base {}", down.x, down.y, self.rotation);

        response.ring = Some(RingUpdate::Track(self.rotation));
        if down.source == PointerSource::Mouse {
            response.capture = Some(PointerCapture::Acquire);
        }
        response
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> GestureResponse {
        let GestureState::Dragging(mut session) = self.state else {
            return GestureResponse::default();
        };
        session.last_x = x;
        self.state = GestureState::Dragging(session);

        // Rotation has no meaning with 0 or 1 slots.
        if self.slot_count <= 1 {
            return GestureResponse::default();
        }

        let delta_x = x - session.anchor_x;
        let delta_y = y - session.anchor_y;

        if !session.horizontal_locked {
            if session.over_scroll_list
                && delta_y.abs() > delta_x.abs()
                && delta_y.abs() > self.threshold
            {
                log::debug!("Vertical scroll claimed the gesture");
                self.state = GestureState::Suppressed;
                return GestureResponse {
                    capture: (session.source == PointerSource::Mouse)
                        .then_some(PointerCapture::Release),
                    ..Default::default()
                };
            }
            if delta_x.abs() <= self.threshold {
                return GestureResponse::default();
            }
            session.horizontal_locked = true;
            self.state = GestureState::Dragging(session);
        }

        GestureResponse {
            ring: Some(RingUpdate::Track(drag_preview(
                session.base_rotation,
                delta_x,
                self.sensitivity,
            ))),
            block_scroll: true,
            capture: None,
        }
    }

    pub fn pointer_up(&mut self, x: f64) -> GestureResponse {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Dragging(session) => {
                let settled = self.finish_drag(&session, x);
                GestureResponse {
                    ring: Some(RingUpdate::Settle {
                        rotation: settled,
                        transition: SETTLE_TRANSITION,
                    }),
                    block_scroll: false,
                    capture: (session.source == PointerSource::Mouse)
                        .then_some(PointerCapture::Release),
                }
            }
            GestureState::Suppressed | GestureState::Idle => GestureResponse::default(),
        }
    }

    fn finish_drag(&mut self, session: &GestureSession, x: f64) -> f64 {
        let delta_x = x - session.anchor_x;
        self.rotation = snap(session.base_rotation, delta_x, self.sensitivity, self.slot_count);
        self.state = GestureState::Idle;
        log::debug!("Drag released after {}px, settled at {}", delta_x, self.rotation);
        self.rotation
    }
}
