// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: videos, markers, the collection and its store.

pub mod collection;
pub mod store;
pub mod video;
