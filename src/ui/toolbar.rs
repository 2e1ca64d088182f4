// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the add-video input.

use crate::config::constants::MAX_VIDEOS;

/// Display the toolbar. Returns true when the user asks to add the link.
pub fn show(ui: &mut egui::Ui, link_input: &mut String, video_count: usize) -> bool {
    let mut add = false;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Video:");

        let response = ui.add(
            egui::TextEdit::singleline(link_input)
                .hint_text("Paste a YouTube link or video ID")
                .desired_width(360.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            add = true;
        }

        if ui.button("➕ Add Video").clicked() {
            add = true;
        }

        ui.separator();

        ui.label(
            egui::RichText::new(format!("{video_count}/{MAX_VIDEOS} videos"))
                .italics()
                .weak(),
        );
        ui.label(
            egui::RichText::new("Drag the carousel sideways to rotate")
                .italics()
                .weak(),
        );
    });

    add
}
