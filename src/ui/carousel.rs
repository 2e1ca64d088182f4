// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! 3D carousel of video cards.
//!
//! Cards are placed on a ring and projected onto the canvas; the ring is
//! drawn at whatever angle the caller passes in (settled, dragging or
//! mid-animation). Pointer input over the ring is reported back as
//! [`CarouselEvent`]s for the gesture controller.

use crate::carousel::geometry::{layout, slot_visual_angle};
use crate::carousel::gesture::{PointerDown, PointerSource};
use crate::models::video::VideoEntry;
use std::collections::HashMap;

const CARD_WIDTH: f32 = 220.0;
const CARD_HEIGHT: f32 = 300.0;
const LINE_HEIGHT: f32 = 18.0;

/// Buttons drawn on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardControl {
    DeleteVideo(String),
    Capture(String),
}

/// Part of a card under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardRegion {
    Body,
    MarkerList,
    DeleteButton,
    CaptureButton,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardHit {
    pub id: String,
    pub region: CardRegion,
}

impl CardHit {
    fn control(&self) -> Option<CardControl> {
        match self.region {
            CardRegion::DeleteButton => Some(CardControl::DeleteVideo(self.id.clone())),
            CardRegion::CaptureButton => Some(CardControl::Capture(self.id.clone())),
            CardRegion::Body | CardRegion::MarkerList => None,
        }
    }
}

/// Result of carousel interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEvent {
    Down(PointerDown),
    Move { x: f64, y: f64 },
    Up { x: f64 },
    /// Vertical travel over a card's marker list while the ring ignores it.
    Scroll { id: String, delta: f32 },
    Control(CardControl),
    Select(String),
}

/// Pointer bookkeeping that must survive between frames.
#[derive(Debug, Default)]
pub struct CarouselMemory {
    pressed: Option<CardHit>,
    press_pos: Option<egui::Pos2>,
    /// Follow the pointer outside the carousel until release.
    pub captured: bool,
    /// The ring is not tracking this gesture (control or scroll).
    pub suppressed: bool,
}

/// A card after projection onto the canvas.
struct ProjectedCard {
    index: usize,
    rect: egui::Rect,
    scale: f32,
    depth: f32,
    back_facing: bool,
}

struct CardRegions {
    delete: egui::Rect,
    capture: egui::Rect,
    list: egui::Rect,
}

fn card_regions(rect: egui::Rect, scale: f32) -> CardRegions {
    let pad = 8.0 * scale;
    CardRegions {
        delete: egui::Rect::from_min_size(
            egui::pos2(rect.right() - 74.0 * scale, rect.top() + 4.0 * scale),
            egui::vec2(70.0 * scale, 22.0 * scale),
        ),
        capture: egui::Rect::from_min_size(
            egui::pos2(rect.left() + pad, rect.bottom() - 32.0 * scale),
            egui::vec2(rect.width() - 2.0 * pad, 26.0 * scale),
        ),
        list: egui::Rect::from_min_max(
            egui::pos2(rect.left() + pad, rect.top() + 32.0 * scale),
            egui::pos2(rect.right() - pad, rect.bottom() - 38.0 * scale),
        ),
    }
}

/// Project every slot onto the canvas, back to front.
fn project_cards(canvas: egui::Rect, slot_count: usize, rotation: f64, radius: f32) -> Vec<ProjectedCard> {
    let center = canvas.center();
    let screen_radius = radius.min((canvas.width() - CARD_WIDTH) * 0.5).max(0.0);

    let mut cards: Vec<ProjectedCard> = layout(slot_count, rotation)
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let angle = slot_visual_angle(index, slot_count, rotation).to_radians() as f32;
            let depth = angle.cos();
            let scale = 0.6 + 0.4 * (depth + 1.0) * 0.5;
            let size = egui::vec2(CARD_WIDTH * scale, CARD_HEIGHT * scale);
            let pos = egui::pos2(center.x + screen_radius * angle.sin(), center.y);
            ProjectedCard {
                index,
                rect: egui::Rect::from_center_size(pos, size),
                scale,
                depth,
                back_facing: slot.is_back_facing,
            }
        })
        .collect();

    cards.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    cards
}

/// Find the front-most card region under `pos`.
fn hit_test(cards: &[ProjectedCard], videos: &[VideoEntry], pos: egui::Pos2) -> Option<CardHit> {
    let card = cards.iter().rev().find(|card| card.rect.contains(pos))?;
    let id = videos.get(card.index)?.id.clone();

    let region = if card.back_facing {
        CardRegion::Body
    } else {
        let regions = card_regions(card.rect, card.scale);
        if regions.delete.contains(pos) {
            CardRegion::DeleteButton
        } else if regions.capture.contains(pos) {
            CardRegion::CaptureButton
        } else if regions.list.contains(pos) {
            CardRegion::MarkerList
        } else {
            CardRegion::Body
        }
    };
    Some(CardHit { id, region })
}

/// Draw the carousel and collect pointer events.
pub fn show(
    ui: &mut egui::Ui,
    videos: &[VideoEntry],
    rotation: f64,
    radius: f32,
    list_scroll: &HashMap<String, f32>,
    memory: &mut CarouselMemory,
) -> Vec<CarouselEvent> {
    let mut events = Vec::new();
    let canvas = ui.available_rect_before_wrap();
    let _response = ui.allocate_rect(canvas, egui::Sense::click_and_drag());
    let painter = ui.painter_at(canvas);

    painter.rect_filled(canvas, 0.0, egui::Color32::from_gray(30));

    if videos.is_empty() {
        painter.text(
            canvas.center(),
            egui::Align2::CENTER_CENTER,
            "Add a video link above to start your gallery",
            egui::FontId::proportional(16.0),
            egui::Color32::from_gray(170),
        );
    }

    let cards = project_cards(canvas, videos.len(), rotation, radius);
    for card in &cards {
        if let Some(video) = videos.get(card.index) {
            let scroll = list_scroll.get(&video.id).copied().unwrap_or(0.0);
            draw_card(&painter, video, card, scroll);
        }
    }

    let (pos, pressed, released, delta, touch) = ui.input(|i| {
        (
            i.pointer.interact_pos(),
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.delta(),
            i.any_touches(),
        )
    });
    let Some(pos) = pos else {
        return events;
    };

    if pressed && canvas.contains(pos) {
        let hit = hit_test(&cards, videos, pos);
        let on_control = hit.as_ref().is_some_and(|h| h.control().is_some());
        let over_scroll_list = hit
            .as_ref()
            .is_some_and(|h| h.region == CardRegion::MarkerList);
        memory.pressed = hit;
        memory.press_pos = Some(pos);
        events.push(CarouselEvent::Down(PointerDown {
            x: pos.x as f64,
            y: pos.y as f64,
            source: if touch {
                PointerSource::Touch
            } else {
                PointerSource::Mouse
            },
            on_control,
            over_scroll_list,
        }));
    } else if memory.press_pos.is_some() && !released && delta != egui::Vec2::ZERO {
        if memory.captured || canvas.contains(pos) {
            events.push(CarouselEvent::Move {
                x: pos.x as f64,
                y: pos.y as f64,
            });
        }
        if memory.suppressed {
            if let Some(hit) = &memory.pressed {
                if hit.region == CardRegion::MarkerList {
                    events.push(CarouselEvent::Scroll {
                        id: hit.id.clone(),
                        delta: -delta.y,
                    });
                }
            }
        }
    }

    if released {
        if let Some(start) = memory.press_pos.take() {
            events.push(CarouselEvent::Up { x: pos.x as f64 });

            let is_click = start.distance(pos) < 6.0;
            if let Some(hit) = memory.pressed.take() {
                let same_target = hit_test(&cards, videos, pos).as_ref() == Some(&hit);
                if is_click && same_target {
                    events.push(match hit.control() {
                        Some(control) => CarouselEvent::Control(control),
                        None => CarouselEvent::Select(hit.id),
                    });
                }
            }
        }
    }

    events
}

fn draw_card(painter: &egui::Painter, video: &VideoEntry, card: &ProjectedCard, scroll: f32) {
    let s = card.scale;
    let rect = card.rect;
    let shade = (110.0 + 90.0 * (card.depth + 1.0) * 0.5) as u8;
    let fill = if card.back_facing {
        egui::Color32::from_rgb(shade / 3, shade / 3, shade / 2)
    } else {
        egui::Color32::from_rgb(shade / 4, shade / 4, shade / 3 + 20)
    };

    painter.rect_filled(rect, 8.0 * s, fill);
    painter.rect_stroke(rect, 8.0 * s, egui::Stroke::new(1.5, egui::Color32::from_gray(shade)));

    if card.back_facing {
        // Flipped content: only the id, dimmed.
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            &video.id,
            egui::FontId::monospace(12.0 * s),
            egui::Color32::from_gray(90),
        );
        return;
    }

    let regions = card_regions(rect, s);
    painter.text(
        egui::pos2(rect.left() + 8.0 * s, rect.top() + 15.0 * s),
        egui::Align2::LEFT_CENTER,
        &video.id,
        egui::FontId::monospace(12.0 * s),
        egui::Color32::WHITE,
    );
    draw_button(painter, regions.delete, "Delete", s, egui::Color32::from_rgb(150, 45, 45));
    draw_button(painter, regions.capture, "Capture Time", s, egui::Color32::from_rgb(40, 100, 160));

    let list_painter = painter.with_clip_rect(regions.list);
    list_painter.rect_filled(regions.list, 4.0 * s, egui::Color32::from_black_alpha(60));
    if video.markers().is_empty() {
        list_painter.text(
            regions.list.center(),
            egui::Align2::CENTER_CENTER,
            "No timestamps yet",
            egui::FontId::proportional(11.0 * s),
            egui::Color32::from_gray(140),
        );
    }
    for (row, marker) in video.markers().iter().enumerate() {
        let y = regions.list.top() + (row as f32 + 0.5) * LINE_HEIGHT * s - scroll;
        let text = if marker.note.is_empty() {
            marker.label()
        } else {
            format!("{}  {}", marker.label(), marker.note)
        };
        list_painter.text(
            egui::pos2(regions.list.left() + 6.0 * s, y),
            egui::Align2::LEFT_CENTER,
            text,
            egui::FontId::proportional(12.0 * s),
            egui::Color32::from_rgb(200, 220, 255),
        );
    }
}

fn draw_button(painter: &egui::Painter, rect: egui::Rect, label: &str, scale: f32, fill: egui::Color32) {
    painter.rect_filled(rect, 4.0 * scale, fill);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(12.0 * scale),
        egui::Color32::WHITE,
    );
}

/// Furthest a marker list can scroll.
pub fn max_list_scroll(video: &VideoEntry) -> f32 {
    let content = video.markers().len() as f32 * LINE_HEIGHT;
    (content - (CARD_HEIGHT - 70.0)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(1200.0, 600.0))
    }

    fn videos(n: usize) -> Vec<VideoEntry> {
        (0..n).map(|i| VideoEntry::new(format!("video{i:06}"))).collect()
    }

    #[test]
    fn test_projection_front_card_is_centered_and_last() {
        let cards = project_cards(canvas(), 4, 0.0, 400.0);
        assert_eq!(cards.len(), 4);
        let front = cards.last().unwrap();
        assert_eq!(front.index, 0);
        assert!((front.rect.center().x - 600.0).abs() < 0.01);
        assert!(!front.back_facing);
        assert!(cards.iter().any(|c| c.back_facing && c.index == 2));
    }

    #[test]
    fn test_hit_test_regions() {
        let videos = videos(3);
        let cards = project_cards(canvas(), 3, 0.0, 400.0);
        let front = cards.last().unwrap();
        let regions = card_regions(front.rect, front.scale);

        let hit = |pos| hit_test(&cards, &videos, pos).map(|h| h.region);
        assert_eq!(hit(regions.delete.center()), Some(CardRegion::DeleteButton));
        assert_eq!(hit(regions.capture.center()), Some(CardRegion::CaptureButton));
        assert_eq!(hit(regions.list.center()), Some(CardRegion::MarkerList));
        assert_eq!(hit(egui::pos2(2.0, 2.0)), None);

        let control = hit_test(&cards, &videos, regions.delete.center())
            .and_then(|h| h.control());
        assert_eq!(control, Some(CardControl::DeleteVideo("video000000".into())));
    }

    #[test]
    fn test_max_list_scroll() {
        let mut video = VideoEntry::new("dQw4w9WgXcQ");
        assert_eq!(max_list_scroll(&video), 0.0);
        for t in 0..40 {
            video.insert_marker(crate::models::video::Marker::new(t, ""));
        }
        assert!(max_list_scroll(&video) > 0.0);
    }
}
