// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Carousel ring geometry.
//!
//! Slots sit on a ring at equal angular spacing. The whole ring rotates
//! about its vertical axis by a single angle; a slot whose resulting angle
//! lands in the rear half of the ring shows its back face.

/// Placement of one slot on the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotLayout {
    /// Angle of the slot on the ring, before ring rotation.
    pub placement_angle: f64,
    /// Whether the slot currently faces away from the viewer.
    pub is_back_facing: bool,
}

/// Angular spacing between neighbouring slots.
pub fn slot_increment(slot_count: usize) -> f64 {
    360.0 / slot_count as f64
}

/// Angle of slot `index` on an unrotated ring.
pub fn slot_base_angle(index: usize, slot_count: usize) -> f64 {
    index as f64 * slot_increment(slot_count)
}

/// Angle of slot `index` after ring rotation, normalized to `[0, 360)`.
pub fn slot_visual_angle(index: usize, slot_count: usize, rotation_degrees: f64) -> f64 {
    let angle = (slot_base_angle(index, slot_count) + rotation_degrees).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if angle >= 360.0 {
        0.0
    } else {
        angle
    }
}

/// A normalized angle strictly between 90 and 270 degrees faces away.
pub fn is_back_facing(visual_angle: f64) -> bool {
    visual_angle > 90.0 && visual_angle < 270.0
}

/// Place every slot for the given rotation. Empty for zero slots.
pub fn layout(slot_count: usize, rotation_degrees: f64) -> Vec<SlotLayout> {
    (0..slot_count)
        .map(|index| SlotLayout {
            placement_angle: slot_base_angle(index, slot_count),
            is_back_facing: is_back_facing(slot_visual_angle(
                index,
                slot_count,
                rotation_degrees,
            )),
        })
        .collect()
}

/// Round a rotation to the nearest slot boundary for `slot_count` slots.
///
/// Zero slots quantize to 0.
pub fn quantize(rotation_degrees: f64, slot_count: usize) -> f64 {
    if slot_count == 0 {
        return 0.0;
    }
    let increment = slot_increment(slot_count);
    (rotation_degrees / increment).round() * increment
}

/// Rotation shown while dragging: linear in horizontal displacement.
pub fn drag_preview(base_rotation: f64, delta_x: f64, sensitivity: f64) -> f64 {
    base_rotation + delta_x * sensitivity
}

/// Rotation the ring settles on when a drag is released.
///
/// Halfway cases round away from zero on the slot quotient. With fewer than
/// two slots the ring stays where it was.
pub fn snap(base_rotation: f64, total_delta_x: f64, sensitivity: f64, slot_count: usize) -> f64 {
    if slot_count < 2 {
        return base_rotation;
    }
    quantize(drag_preview(base_rotation, total_delta_x, sensitivity), slot_count)
}

/// Index of the slot nearest the viewer for a rotation.
pub fn front_slot(slot_count: usize, rotation_degrees: f64) -> Option<usize> {
    (0..slot_count).min_by(|&a, &b| {
        let dist = |i| {
            let angle = slot_visual_angle(i, slot_count, rotation_degrees);
            angle.min(360.0 - angle)
        };
        dist(a).total_cmp(&dist(b))
    })
}

/// Quadratic ease-in-out on `t` in `[0, 1]`.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - 2.0 * (1.0 - t) * (1.0 - t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_layout_placement_angles() {
        for n in 1..=6 {
            for rotation in [0.0, 45.0, -720.5, 1234.0] {
                let slots = layout(n, rotation);
                assert_eq!(slots.len(), n);
                for (i, slot) in slots.iter().enumerate() {
                    assert!(approx(slot.placement_angle, i as f64 * 360.0 / n as f64));
                }
            }
        }
    }

    #[test]
    fn test_layout_empty() {
        assert!(layout(0, 90.0).is_empty());
        assert_eq!(quantize(123.0, 0), 0.0);
    }

    #[test]
    fn test_back_facing() {
        let facing: Vec<bool> = layout(4, 0.0).iter().map(|s| s.is_back_facing).collect();
        assert_eq!(facing, vec![false, false, true, false]);

        // Rotating by one slot brings the last slot round to the front.
        let facing: Vec<bool> = layout(4, 90.0).iter().map(|s| s.is_back_facing).collect();
        assert_eq!(facing, vec![false, true, false, false]);

        // Negative rotations normalize the same way.
        let facing: Vec<bool> = layout(4, -270.0).iter().map(|s| s.is_back_facing).collect();
        assert_eq!(facing, vec![false, true, false, false]);

        // The boundaries themselves are front-facing.
        assert!(!is_back_facing(90.0));
        assert!(!is_back_facing(270.0));
        assert!(is_back_facing(180.0));
    }

    #[test]
    fn test_visual_angle_normalized() {
        assert!(approx(slot_visual_angle(1, 4, -100.0), 350.0));
        assert!(approx(slot_visual_angle(0, 3, 720.0), 0.0));
        let tiny = slot_visual_angle(0, 1, -1e-20);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_quantize() {
        assert!(approx(quantize(100.0, 4), 90.0));
        assert!(approx(quantize(-50.0, 4), -90.0));
        assert!(approx(quantize(45.0, 4), 90.0));
        assert!(approx(quantize(-45.0, 4), -90.0));
        assert!(approx(quantize(200.0, 3), 240.0));
        assert!(approx(quantize(725.0, 1), 720.0));
    }

    #[test]
    fn test_drag_preview_is_linear() {
        assert!(approx(drag_preview(90.0, 200.0, 0.5), 190.0));
        assert!(approx(drag_preview(90.0, -200.0, 0.5), -10.0));
        assert!(approx(drag_preview(0.0, 0.0, 0.5), 0.0));
    }

    #[test]
    fn test_snap() {
        // 4 slots, 200px at 0.5 deg/px: 100 degrees rounds to 90.
        assert!(approx(snap(0.0, 200.0, 0.5, 4), 90.0));
        assert!(approx(snap(90.0, 200.0, 0.5, 4), 180.0));
        // Already aligned with no displacement stays put.
        for n in 2..=6 {
            for k in -3..=3 {
                let base = k as f64 * 360.0 / n as f64;
                assert!(approx(snap(base, 0.0, 0.5, n), base));
            }
        }
        // Fewer than two slots: unchanged, even off-grid.
        assert_eq!(snap(17.0, 300.0, 0.5, 1), 17.0);
        assert_eq!(snap(17.0, 300.0, 0.5, 0), 17.0);
    }

    #[test]
    fn test_front_slot() {
        assert_eq!(front_slot(0, 0.0), None);
        assert_eq!(front_slot(4, 0.0), Some(0));
        assert_eq!(front_slot(4, 90.0), Some(3));
        assert_eq!(front_slot(4, -90.0), Some(1));
        assert_eq!(front_slot(3, 240.0), Some(1));
    }

    #[test]
    fn test_ease_in_out() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!(approx(ease_in_out(0.5), 0.5));
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
        assert_eq!(ease_in_out(2.0), 1.0);
    }
}
