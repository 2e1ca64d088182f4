// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Snapshot persistence and collection import/export.

pub mod serialization;
pub mod storage;
