// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video identifier extraction.
//!
//! Accepts either a bare 11-character id or one of the recognized link
//! shapes (`youtu.be/<id>`, `youtube.com/watch?v=<id>`, `/embed/<id>`,
//! `/v/<id>`) and returns the canonical id.

use regex::Regex;
use std::sync::LazyLock;

/// Length of every canonical video id.
pub const VIDEO_ID_LEN: usize = 11;

static BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("bare id pattern"));

// The id must be followed by the end of input or a separator, so a 12th id
// character never gets silently dropped.
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:https?://)?(?:www\.)?",
        r"(?:youtu\.be/|youtube\.com/(?:embed/|v/|watch\?v=|watch\?\S+&v=))",
        r"([A-Za-z0-9_-]{11})",
        r"(?:[?&#/]\S*)?$",
    ))
    .expect("video link pattern")
});

/// Check that `id` is a canonical video id.
pub fn is_valid_id(id: &str) -> bool {
    id.len() == VIDEO_ID_LEN && BARE_ID.is_match(id)
}

/// Map user input (link or raw id) to a canonical video id.
///
/// Surrounding whitespace is ignored. Returns `None` for anything that is
/// not a recognized link or bare id.
pub fn extract_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(caps) = LINK.captures(input) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }

    is_valid_id(input).then(|| input.to_string())
}
