// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Time-based tween for the ring's displayed angle.
//!
//! Purely visual: the gesture controller already holds the settled target,
//! so cutting an animation short never loses state.

use super::gesture::RingUpdate;
use super::geometry::ease_in_out;

#[derive(Debug, Clone, Default)]
pub struct RingAnimator {
    from: f64,
    target: f64,
    started_at: f64,
    duration: f64,
    active: bool,
}

impl RingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Apply a ring update at time `now` (seconds).
    pub fn apply(&mut self, update: RingUpdate, now: f64) {
        match update {
            RingUpdate::Track(angle) => {
                self.active = false;
                self.from = angle;
                self.target = angle;
            }
            RingUpdate::Settle {
                rotation,
                transition,
            } => {
                self.from = self.displayed(now);
                self.target = rotation;
                self.started_at = now;
                self.duration = transition.as_secs_f64();
                self.active = self.duration > 0.0 && self.from != rotation;
            }
        }
    }

    /// Angle to draw at time `now`.
    pub fn displayed(&mut self, now: f64) -> f64 {
        if !self.active {
            return self.target;
        }
        let t = (now - self.started_at) / self.duration;
        if t >= 1.0 {
            self.active = false;
            return self.target;
        }
        self.from + (self.target - self.from) * ease_in_out(t)
    }
}
