// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Marker panel for the focused video.
//!
//! Lists the saved timestamps with seek, share and delete controls, and
//! hosts the capture, manual entry and player transport controls.

use crate::models::video::VideoEntry;
use crate::playback::PlayerState;
use crate::util::timecode::format_seconds;

/// Actions that can be triggered from the marker panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkersAction {
    None,
    Seek(u64),
    Share(u64),
    DeleteMarker(u64),
    Capture,
    AddManual,
    TogglePlayback,
    DeleteVideo,
}

/// Transport readout for the focused video's player.
#[derive(Debug, Clone, Copy)]
pub struct PlayerStatus {
    pub state: PlayerState,
    pub position: f64,
}

/// Display the marker panel.
pub fn show(
    ui: &mut egui::Ui,
    video: Option<&VideoEntry>,
    player: Option<PlayerStatus>,
    manual_input: &mut String,
) -> MarkersAction {
    let mut action = MarkersAction::None;

    ui.heading("Timestamps");
    ui.separator();

    let Some(video) = video else {
        ui.label(egui::RichText::new("Select a video in the carousel").italics().weak());
        return action;
    };

    ui.label(egui::RichText::new(&video.id).monospace());
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        let playing = player.is_some_and(|p| p.state == PlayerState::Playing);
        let label = if playing { "⏸ Pause" } else { "▶ Play" };
        if ui.add_enabled(player.is_some(), egui::Button::new(label)).clicked() {
            action = MarkersAction::TogglePlayback;
        }
        let position = player.map(|p| p.position.max(0.0) as u64).unwrap_or(0);
        ui.label(format_seconds(position));
    });

    ui.add_space(4.0);
    if ui.button("Capture Current Time").clicked() {
        action = MarkersAction::Capture;
    }

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(manual_input)
                .hint_text("1:23 chorus")
                .desired_width(140.0),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Add").clicked() || submitted {
            action = MarkersAction::AddManual;
        }
    });

    ui.separator();

    if video.markers().is_empty() {
        ui.label(egui::RichText::new("No timestamps saved yet").italics().weak());
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, true])
        .max_height((ui.available_height() - 40.0).max(60.0))
        .show(ui, |ui| {
            for marker in video.markers() {
                ui.horizontal(|ui| {
                    if ui
                        .link(marker.label())
                        .on_hover_text("Jump to this time")
                        .clicked()
                    {
                        action = MarkersAction::Seek(marker.offset_seconds);
                    }

                    let note = if marker.note.is_empty() {
                        "(no note)"
                    } else {
                        marker.note.as_str()
                    };
                    if ui
                        .add(egui::Label::new(note).sense(egui::Sense::click()))
                        .on_hover_text("Share this moment")
                        .clicked()
                    {
                        action = MarkersAction::Share(marker.offset_seconds);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✖").on_hover_text("Delete").clicked() {
                            action = MarkersAction::DeleteMarker(marker.offset_seconds);
                        }
                    });
                });
            }
        });

    ui.separator();
    if ui
        .add(egui::Button::new("Delete Video").fill(egui::Color32::from_rgb(120, 40, 40)))
        .clicked()
    {
        action = MarkersAction::DeleteVideo;
    }

    action
}
