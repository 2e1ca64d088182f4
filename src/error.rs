// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error taxonomy.
//!
//! Every failure is local to the operation that detects it. Store and
//! session operations return the narrow outcome enums defined beside them;
//! those convert into [`ReelmarksError`] when a caller only needs the
//! category for user feedback.

use thiserror::Error;

/// Top-level error categories surfaced to the user.
#[derive(Error, Debug)]
pub enum ReelmarksError {
    /// Unparseable video id or time expression
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Collection already holds the maximum number of videos
    #[error("Gallery full: at most {max} videos can be kept")]
    CapacityExceeded { max: usize },

    /// Video or marker already exists
    #[error("{0}")]
    DuplicateEntity(String),

    /// Referenced video or marker has since been removed
    #[error("Not found: {0}")]
    NotFound(String),

    /// Playback, share or clipboard service not available
    #[error("Unavailable: {0}")]
    ExternalServiceUnavailable(String),

    /// Reading or writing a snapshot file failed
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ReelmarksError {
    /// Whether the failure is worth showing to the user at all.
    ///
    /// Stale references are expected in an event-driven UI and are dropped
    /// silently.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, ReelmarksError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ReelmarksError>;
