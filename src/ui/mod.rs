// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Reelmarks application.

pub mod carousel;
pub mod dialogs;
pub mod markers;
pub mod toolbar;
