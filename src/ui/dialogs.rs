// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Modal prompts and notices.

use crate::session::{Notice, NoticeLevel};

/// Answer from a modal prompt this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult<T> {
    /// Still waiting for the user.
    Open,
    Accepted(T),
    Cancelled,
}

fn modal(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
}

/// Ask for a note. Accepting returns the text as typed.
pub fn text_prompt(ctx: &egui::Context, message: &str, text: &mut String) -> DialogResult<String> {
    let mut result = DialogResult::Open;

    modal("Capture Timestamp").show(ctx, |ui| {
        ui.label(message);
        let response = ui.add(egui::TextEdit::singleline(text).desired_width(280.0));
        response.request_focus();
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.horizontal(|ui| {
            if ui.button("OK").clicked() || enter {
                result = DialogResult::Accepted(text.clone());
            }
            if ui.button("Cancel").clicked() {
                result = DialogResult::Cancelled;
            }
        });
    });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        result = DialogResult::Cancelled;
    }
    result
}

/// Ask a yes/no question.
pub fn confirm(ctx: &egui::Context, message: &str) -> DialogResult<()> {
    let mut result = DialogResult::Open;

    modal("Confirm").show(ctx, |ui| {
        ui.label(message);
        ui.horizontal(|ui| {
            if ui.button("Delete").clicked() {
                result = DialogResult::Accepted(());
            }
            if ui.button("Cancel").clicked() {
                result = DialogResult::Cancelled;
            }
        });
    });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        result = DialogResult::Cancelled;
    }
    result
}

/// Draw a notice. Returns true when the user dismisses it.
pub fn notice(ui: &mut egui::Ui, notice: &Notice) -> bool {
    let (fill, text_color) = match notice.level {
        NoticeLevel::Banner => (egui::Color32::from_rgb(170, 40, 40), egui::Color32::WHITE),
        NoticeLevel::Error => (egui::Color32::from_rgb(90, 30, 30), egui::Color32::from_rgb(255, 200, 200)),
        NoticeLevel::Info => (egui::Color32::from_rgb(30, 60, 90), egui::Color32::from_rgb(200, 225, 255)),
    };

    let mut dismissed = false;
    egui::Frame::none()
        .fill(fill)
        .inner_margin(egui::Margin::symmetric(8.0, 4.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&notice.text).color(text_color).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    dismissed = ui.small_button("✖").clicked();
                });
            });
        });
    dismissed
}
