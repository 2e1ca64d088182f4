// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Command line options, data paths and layout constants.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Fixed limits and tuning values shared across the application.
pub mod constants {
    use super::Duration;

    /// Maximum number of videos the collection holds.
    pub const MAX_VIDEOS: usize = 6;

    /// Degrees of ring rotation per pixel of horizontal drag.
    pub const SENSITIVITY: f64 = 0.5;

    /// Pixels of travel before a drag commits to an axis.
    pub const SCROLL_THRESHOLD: f64 = 5.0;

    /// Length of the eased settle animation after release.
    pub const SETTLE_TRANSITION: Duration = Duration::from_millis(500);

    /// Ring radius in pixels.
    pub const CAROUSEL_RADIUS: f32 = 400.0;

    /// Ring radius used on narrow viewports.
    pub const COMPACT_CAROUSEL_RADIUS: f32 = 280.0;

    /// Viewport width at or below which the compact radius applies.
    pub const COMPACT_WIDTH: f32 = 500.0;

    /// How long the "collection full" notice stays on screen.
    pub const LIMIT_NOTICE_DURATION: Duration = Duration::from_secs(6);
}

/// Command line arguments.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "reelmarks", about = "Bookmark videos and pin named time markers")]
pub struct Args {
    /// Launch address, e.g. `reelmarks://open?share_url=https://youtu.be/<id>`
    pub launch_url: Option<String>,

    /// Shared video link to ingest on startup
    #[arg(long)]
    pub share_url: Option<String>,

    /// Collection file (defaults to the platform data directory)
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Always use the compact carousel radius
    #[arg(long)]
    pub compact: bool,

    /// Keep the gallery in memory only; nothing is read or written
    #[arg(long)]
    pub ephemeral: bool,
}

impl Args {
    /// Resolve where the collection snapshot is stored.
    pub fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(default_data_file)
    }
}

/// `<data dir>/reelmarks/collection.json`, or the working directory when the
/// platform has no data directory.
pub fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("reelmarks"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("collection.json")
}

/// Pick the ring radius for the current viewport width.
pub fn carousel_radius(viewport_width: f32, force_compact: bool) -> f32 {
    if force_compact || viewport_width <= constants::COMPACT_WIDTH {
        constants::COMPACT_CAROUSEL_RADIUS
    } else {
        constants::CAROUSEL_RADIUS
    }
}
