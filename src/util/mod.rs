// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pure text helpers: video id extraction and time expressions.

pub mod timecode;
pub mod video_id;
