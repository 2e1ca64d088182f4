// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Carousel: ring geometry, gesture handling and the settle tween.

pub mod animator;
pub mod geometry;
pub mod gesture;
