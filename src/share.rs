// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Sharing a marker as a deep link.
//!
//! Tries the host's native share sheet first and falls back to the
//! clipboard. Outcomes only ever feed user-visible status; they never touch
//! the collection.

use thiserror::Error;

/// Failure reported by a share or clipboard backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    /// The user dismissed the share sheet.
    #[error("share cancelled")]
    Cancelled,
    #[error("share failed: {0}")]
    Failed(String),
    /// The host has no such capability.
    #[error("not supported")]
    Unavailable,
}

/// Host share/clipboard capabilities.
pub trait ShareTarget {
    fn native_share(&mut self, title: &str, text: &str, url: &str) -> Result<(), ShareError>;
    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), ShareError>;
}

/// How a share request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Cancelled,
    Copied,
    CopyFailed(String),
    Unsupported,
}

impl ShareOutcome {
    /// Status text for the user, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            ShareOutcome::Shared | ShareOutcome::Cancelled => None,
            ShareOutcome::Copied => Some(
                "Link and note copied to clipboard! You can paste it into any app.".to_string(),
            ),
            ShareOutcome::CopyFailed(reason) => Some(format!(
                "Could not copy link to clipboard ({reason}). Please check permissions."
            )),
            ShareOutcome::Unsupported => {
                Some("Sharing and clipboard features are not supported here.".to_string())
            }
        }
    }
}

pub const SHARE_TITLE: &str = "YouTube Timestamp";

/// Canonical link that opens `video_id` at `seconds`.
pub fn deep_link(video_id: &str, seconds: u64) -> String {
    format!("https://youtu.be/{video_id}?t={seconds}")
}

/// Clipboard payload: the note, a blank line, then the link.
pub fn clipboard_text(note: &str, link: &str) -> String {
    format!("{note}\n\n{link}")
}

/// Share a marker through `target`.
pub fn share_marker(
    target: &mut dyn ShareTarget,
    video_id: &str,
    seconds: u64,
    note: &str,
) -> ShareOutcome {
    let link = deep_link(video_id, seconds);

    match target.native_share(SHARE_TITLE, note, &link) {
        Ok(()) => return ShareOutcome::Shared,
        Err(ShareError::Cancelled) => return ShareOutcome::Cancelled,
        Err(ShareError::Failed(reason)) => {
            log::warn!("Native share failed, falling back to clipboard: {}", reason);
        }
        Err(ShareError::Unavailable) => {}
    }

    match target.copy_to_clipboard(&clipboard_text(note, &link)) {
        Ok(()) => ShareOutcome::Copied,
        Err(ShareError::Unavailable) => ShareOutcome::Unsupported,
        Err(e) => {
            log::error!("Could not copy text: {}", e);
            ShareOutcome::CopyFailed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedTarget {
        native: Result<(), ShareError>,
        clipboard: Result<(), ShareError>,
        shared: Vec<(String, String, String)>,
        copied: Vec<String>,
    }

    impl ScriptedTarget {
        fn new(native: Result<(), ShareError>, clipboard: Result<(), ShareError>) -> Self {
            Self {
                native,
                clipboard,
                shared: Vec::new(),
                copied: Vec::new(),
            }
        }
    }

    impl ShareTarget for ScriptedTarget {
        fn native_share(&mut self, title: &str, text: &str, url: &str) -> Result<(), ShareError> {
            self.shared.push((title.into(), text.into(), url.into()));
            self.native.clone()
        }

        fn copy_to_clipboard(&mut self, text: &str) -> Result<(), ShareError> {
            self.copied.push(text.into());
            self.clipboard.clone()
        }
    }

    #[test]
    fn test_deep_link() {
        assert_eq!(deep_link("dQw4w9WgXcQ", 83), "https://youtu.be/dQw4w9WgXcQ?t=83");
    }

    #[test]
    fn test_native_share() {
        let mut target = ScriptedTarget::new(Ok(()), Ok(()));
        assert_eq!(
            share_marker(&mut target, "dQw4w9WgXcQ", 83, "chorus"),
            ShareOutcome::Shared
        );
        assert_eq!(
            target.shared,
            vec![(
                SHARE_TITLE.to_string(),
                "chorus".to_string(),
                "https://youtu.be/dQw4w9WgXcQ?t=83".to_string()
            )]
        );
        assert!(target.copied.is_empty());
    }

    #[test]
    fn test_cancel_does_not_fall_back() {
        let mut target = ScriptedTarget::new(Err(ShareError::Cancelled), Ok(()));
        assert_eq!(
            share_marker(&mut target, "dQw4w9WgXcQ", 83, "chorus"),
            ShareOutcome::Cancelled
        );
        assert!(target.copied.is_empty());
    }

    #[test]
    fn test_clipboard_fallback() {
        for native in [Err(ShareError::Unavailable), Err(ShareError::Failed("boom".into()))] {
            let mut target = ScriptedTarget::new(native, Ok(()));
            assert_eq!(
                share_marker(&mut target, "dQw4w9WgXcQ", 83, "chorus"),
                ShareOutcome::Copied
            );
            assert_eq!(target.copied, vec!["chorus\n\nhttps://youtu.be/dQw4w9WgXcQ?t=83"]);
        }
    }

    #[test]
    fn test_nothing_available() {
        let mut target =
            ScriptedTarget::new(Err(ShareError::Unavailable), Err(ShareError::Unavailable));
        let outcome = share_marker(&mut target, "dQw4w9WgXcQ", 83, "chorus");
        assert_eq!(outcome, ShareOutcome::Unsupported);
        assert!(outcome.message().is_some());

        let mut target = ScriptedTarget::new(
            Err(ShareError::Unavailable),
            Err(ShareError::Failed("denied".into())),
        );
        assert!(matches!(
            share_marker(&mut target, "dQw4w9WgXcQ", 83, "chorus"),
            ShareOutcome::CopyFailed(_)
        ));
    }
}
