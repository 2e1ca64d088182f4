// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Reelmarks - timestamped bookmarks for YouTube videos
//!
//! A desktop gallery of up to six videos arranged on a draggable 3D
//! carousel, each with its own list of saved, shareable moments.

mod app;
mod carousel;
mod config;
mod error;
mod io;
mod launch;
mod models;
mod playback;
mod session;
mod share;
mod ui;
mod util;

use anyhow::Result;
use app::ReelmarksApp;
use clap::Parser;
use config::Args;
use io::storage::{JsonFileStore, MemoryStore, SnapshotStore};
use launch::LaunchAddress;
use models::store::CollectionStore;
use playback::{ClockPlayerFactory, PlayerRegistry};
use session::Session;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let storage: Box<dyn SnapshotStore> = if args.ephemeral {
        log::info!("Gallery kept in memory only");
        Box::new(MemoryStore::new())
    } else {
        let file_store = JsonFileStore::new(args.data_file());
        log::info!("Gallery stored at {}", file_store.path().display());
        Box::new(file_store)
    };

    let store = CollectionStore::open(storage);
    let players = PlayerRegistry::new(Box::new(ClockPlayerFactory));
    let session = Session::new(store, players);
    let launch = LaunchAddress::from_args(&args);
    let force_compact = args.compact;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([420.0, 480.0])
            .with_title("Reelmarks"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Reelmarks",
        options,
        Box::new(move |_cc| Ok(Box::new(ReelmarksApp::new(session, launch, force_compact)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
