// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! The app is the render/binding layer: it turns egui input into session
//! intents and redraws from what the session reports. Modal prompts run
//! across frames, so captures and deletions are finished once the dialog
//! closes, answering the session's prompt from the dialog result.

use crate::carousel::animator::RingAnimator;
use crate::carousel::geometry::front_slot;
use crate::carousel::gesture::{GestureResponse, GestureState, PointerCapture};
use crate::config::carousel_radius;
use crate::error::ReelmarksError;
use crate::launch::LaunchAddress;
use crate::playback::PlayerState;
use crate::session::{Notice, PendingCapture, Session, UserPrompt, DELETE_VIDEO_CONFIRMATION};
use crate::share::{ShareError, ShareTarget};
use crate::ui::carousel::{self, CardControl, CarouselEvent, CarouselMemory};
use crate::ui::dialogs::{self, DialogResult};
use crate::ui::markers::{self, MarkersAction, PlayerStatus};
use crate::ui::toolbar;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Share backend for the desktop: no share sheet, egui's clipboard.
struct EguiShare<'a> {
    ctx: &'a egui::Context,
}

impl ShareTarget for EguiShare<'_> {
    fn native_share(&mut self, _title: &str, _text: &str, _url: &str) -> Result<(), ShareError> {
        Err(ShareError::Unavailable)
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), ShareError> {
        let text = text.to_string();
        self.ctx.output_mut(|o| o.copied_text = text);
        Ok(())
    }
}

/// Answer from a closed egui modal.
struct ModalAnswer {
    text: Option<String>,
    confirmed: bool,
}

impl ModalAnswer {
    fn from_text(result: DialogResult<String>) -> Self {
        let text = match result {
            DialogResult::Accepted(text) => Some(text),
            _ => None,
        };
        Self {
            confirmed: text.is_some(),
            text,
        }
    }

    fn confirmed() -> Self {
        Self {
            text: None,
            confirmed: true,
        }
    }
}

impl UserPrompt for ModalAnswer {
    fn request_text(&mut self, _message: &str) -> Option<String> {
        self.text.take()
    }

    fn confirm(&mut self, _message: &str) -> bool {
        self.confirmed
    }
}

/// A notice and when it appeared.
struct ActiveNotice {
    notice: Notice,
    shown_at: f64,
}

/// Main application state.
pub struct ReelmarksApp {
    session: Session,
    force_compact: bool,

    /// Add-video text field
    link_input: String,
    /// Manual "time note" field in the marker panel
    manual_input: String,

    /// Video picked by clicking its card; otherwise the front card is used
    selected: Option<String>,

    animator: RingAnimator,
    carousel: CarouselMemory,
    /// Marker list scroll offset per card
    list_scroll: HashMap<String, f32>,

    notice: Option<ActiveNotice>,
    /// Capture waiting for its note, with the note typed so far
    pending_capture: Option<(PendingCapture, String)>,
    /// Video awaiting delete confirmation
    confirm_delete: Option<String>,
}

impl ReelmarksApp {
    /// Create the app and ingest any link shared at launch.
    pub fn new(session: Session, mut launch: LaunchAddress, force_compact: bool) -> Self {
        let mut app = Self {
            session,
            force_compact,
            link_input: String::new(),
            manual_input: String::new(),
            selected: None,
            animator: RingAnimator::new(),
            carousel: CarouselMemory::default(),
            list_scroll: HashMap::new(),
            notice: None,
            pending_capture: None,
            confirm_delete: None,
        };

        if let Some(outcome) = app.session.ingest_launch(&mut launch) {
            log::info!("Launch share: {:?}", outcome);
            if let Some(notice) = Notice::from_ingest(&outcome) {
                app.show_notice(notice, 0.0);
            }
        }
        if let Some(address) = launch.visible_address() {
            log::debug!("Launch address now {}", address);
        }
        app
    }

    fn show_notice(&mut self, notice: Notice, now: f64) {
        self.notice = Some(ActiveNotice {
            notice,
            shown_at: now,
        });
    }

    /// Report a failed intent to the user (or quietly, for stale targets).
    fn report(&mut self, err: &ReelmarksError, now: f64) {
        if err.is_reportable() {
            log::warn!("{}", err);
        } else {
            log::debug!("{}", err);
        }
        if let Some(notice) = Notice::from_error(err) {
            self.show_notice(notice, now);
        }
    }

    fn expire_notice(&mut self, now: f64) {
        let expired = self.notice.as_ref().is_some_and(|active| {
            active
                .notice
                .lifetime
                .is_some_and(|lifetime| now - active.shown_at >= lifetime.as_secs_f64())
        });
        if expired {
            self.notice = None;
        }
    }

    /// Video shown in the marker panel.
    fn focused_video(&self) -> Option<String> {
        let videos = self.session.collection().videos();
        if let Some(id) = &self.selected {
            if videos.iter().any(|v| &v.id == id) {
                return Some(id.clone());
            }
        }
        front_slot(videos.len(), self.session.gesture().rotation())
            .and_then(|index| videos.get(index))
            .map(|v| v.id.clone())
    }

    fn apply_gesture(&mut self, response: GestureResponse, now: f64) {
        if let Some(update) = response.ring {
            self.animator.apply(update, now);
        }
        match response.capture {
            Some(PointerCapture::Acquire) => self.carousel.captured = true,
            Some(PointerCapture::Release) => self.carousel.captured = false,
            None => {}
        }
        self.carousel.suppressed = self.session.gesture().state() == GestureState::Suppressed;
    }

    fn add_video(&mut self, now: f64) {
        match self.session.on_add_video(&self.link_input) {
            Ok(id) => {
                self.link_input.clear();
                self.selected = Some(id);
            }
            Err(e) => self.report(&e, now),
        }
    }

    fn start_capture(&mut self, id: &str, now: f64) {
        match self.session.request_capture(id) {
            Ok(pending) => self.pending_capture = Some((pending, String::new())),
            Err(e) => self.report(&e, now),
        }
    }

    fn handle_markers_action(&mut self, ctx: &egui::Context, id: &str, action: MarkersAction, now: f64) {
        let result = match action {
            MarkersAction::None => Ok(()),
            MarkersAction::Seek(offset) => self.session.on_seek(id, offset),
            MarkersAction::Share(offset) => {
                let mut target = EguiShare { ctx };
                self.session.on_share(id, offset, &mut target).map(|outcome| {
                    if let Some(message) = outcome.message() {
                        self.show_notice(
                            Notice {
                                lifetime: Some(Duration::from_secs(4)),
                                ..Notice::info(message)
                            },
                            now,
                        );
                    }
                })
            }
            MarkersAction::DeleteMarker(offset) => self.session.on_delete_marker(id, offset),
            MarkersAction::Capture => {
                self.start_capture(id, now);
                Ok(())
            }
            MarkersAction::AddManual => self
                .session
                .on_manual_marker(id, &self.manual_input)
                .map(|_| self.manual_input.clear()),
            MarkersAction::TogglePlayback => {
                let players = self.session.players_mut();
                let playing = players
                    .get(id)
                    .is_some_and(|p| p.state() == PlayerState::Playing);
                if playing {
                    players.pause(id);
                } else {
                    players.pause_others(Some(id));
                    players.ensure(id).play();
                }
                Ok(())
            }
            MarkersAction::DeleteVideo => {
                self.confirm_delete = Some(id.to_string());
                Ok(())
            }
        };

        if let Err(e) = result {
            self.report(&e, now);
        }
    }

    fn handle_carousel_event(&mut self, event: CarouselEvent, now: f64) {
        match event {
            CarouselEvent::Down(down) => {
                let response = self.session.on_drag_start(down);
                self.apply_gesture(response, now);
            }
            CarouselEvent::Move { x, y } => {
                let response = self.session.on_drag_move(x, y);
                self.apply_gesture(response, now);
            }
            CarouselEvent::Up { x } => {
                let response = self.session.on_drag_end(x);
                self.apply_gesture(response, now);
                self.carousel.suppressed = false;
                if response.ring.is_some() {
                    // The front card changed; follow it.
                    self.selected = None;
                }
            }
            CarouselEvent::Scroll { id, delta } => {
                let max = self
                    .session
                    .collection()
                    .get(&id)
                    .map(carousel::max_list_scroll)
                    .unwrap_or(0.0);
                let offset = self.list_scroll.entry(id).or_insert(0.0);
                *offset = (*offset + delta).clamp(0.0, max);
            }
            CarouselEvent::Control(CardControl::DeleteVideo(id)) => {
                self.confirm_delete = Some(id);
            }
            CarouselEvent::Control(CardControl::Capture(id)) => {
                self.start_capture(&id, now);
            }
            CarouselEvent::Select(id) => {
                self.selected = Some(id);
            }
        }
    }

    fn export(&mut self, path: PathBuf, now: f64) {
        if let Err(e) = self.session.export_to(&path) {
            log::error!("Failed to export gallery: {}", e);
            self.report(&e, now);
        }
    }

    fn import(&mut self, path: PathBuf, now: f64) {
        match self.session.import_from(&path) {
            Ok(()) => {
                self.selected = None;
                self.list_scroll.clear();
            }
            Err(e) => {
                log::error!("Failed to import gallery: {}", e);
                self.report(&e, now);
            }
        }
    }

    fn show_dialogs(&mut self, ctx: &egui::Context, now: f64) {
        if let Some((pending, mut note)) = self.pending_capture.take() {
            match dialogs::text_prompt(ctx, &pending.prompt(), &mut note) {
                DialogResult::Open => self.pending_capture = Some((pending, note)),
                closed => {
                    let mut answer = ModalAnswer::from_text(closed);
                    if let Err(e) = self.session.complete_capture(&pending, &mut answer) {
                        self.report(&e, now);
                    }
                }
            }
        }

        if let Some(id) = self.confirm_delete.take() {
            match dialogs::confirm(ctx, DELETE_VIDEO_CONFIRMATION) {
                DialogResult::Open => self.confirm_delete = Some(id),
                DialogResult::Accepted(()) => {
                    if let Err(e) = self.session.on_delete_video(&id, &mut ModalAnswer::confirmed()) {
                        self.report(&e, now);
                    }
                    self.list_scroll.remove(&id);
                }
                DialogResult::Cancelled => {}
            }
        }
    }

    fn dialog_open(&self) -> bool {
        self.pending_capture.is_some() || self.confirm_delete.is_some()
    }
}

impl eframe::App for ReelmarksApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        for update in self.session.take_ring_updates() {
            self.animator.apply(update, now);
        }
        self.expire_notice(now);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    ui.menu_button("Export Gallery", |ui| {
                        if ui.button("Export as YAML...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("YAML", &["yaml", "yml"])
                                .set_file_name("gallery.yaml")
                                .save_file()
                            {
                                self.export(path, now);
                            }
                            ui.close_menu();
                        }
                        if ui.button("Export as JSON...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .set_file_name("gallery.json")
                                .save_file()
                            {
                                self.export(path, now);
                            }
                            ui.close_menu();
                        }
                    });
                    if ui.button("Import Gallery...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Gallery", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.import(path, now);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.checkbox(&mut self.force_compact, "Compact carousel").clicked() {
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        let add_requested = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.link_input, self.session.collection().len())
            })
            .inner;
        if add_requested {
            self.add_video(now);
        }

        // Notice strip
        if self.notice.is_some() {
            let dismissed = egui::TopBottomPanel::top("notice")
                .show(ctx, |ui| {
                    self.notice
                        .as_ref()
                        .is_some_and(|active| dialogs::notice(ui, &active.notice))
                })
                .inner;
            if dismissed {
                self.notice = None;
            }
        }

        // Marker panel (right side)
        let focused = self.focused_video();
        let status = focused
            .as_deref()
            .and_then(|id| self.session.players().get(id))
            .map(|player| PlayerStatus {
                state: player.state(),
                position: player.current_time(),
            });
        let markers_action = egui::SidePanel::right("markers")
            .default_width(280.0)
            .show(ctx, |ui| {
                let video = focused
                    .as_deref()
                    .and_then(|id| self.session.collection().get(id));
                markers::show(ui, video, status, &mut self.manual_input)
            })
            .inner;
        if let Some(id) = &focused {
            self.handle_markers_action(ctx, id, markers_action, now);
        }

        // Carousel (center)
        let rotation = self.animator.displayed(now);
        let radius = carousel_radius(ctx.screen_rect().width(), self.force_compact);
        let events = egui::CentralPanel::default()
            .show(ctx, |ui| {
                carousel::show(
                    ui,
                    self.session.collection().videos(),
                    rotation,
                    radius,
                    &self.list_scroll,
                    &mut self.carousel,
                )
            })
            .inner;
        if !self.dialog_open() {
            for event in events {
                self.handle_carousel_event(event, now);
            }
        }

        self.show_dialogs(ctx, now);

        if self.animator.is_active() {
            ctx.request_repaint();
        } else if status.is_some_and(|s| s.state == PlayerState::Playing) {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
        if let Some(active) = &self.notice {
            if let Some(lifetime) = active.notice.lifetime {
                let remaining = lifetime.as_secs_f64() - (now - active.shown_at);
                ctx.request_repaint_after(Duration::from_secs_f64(remaining.max(0.0)));
            }
        }
    }
}
