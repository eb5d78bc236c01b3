//! Attack-box vs body overlap.

use bevy::math::{Rect, Vec2};

use super::fighter::Fighter;

/// Axis-aligned box from its top-left corner and size.
pub fn box_from(position: Vec2, size: Vec2) -> Rect {
    Rect::from_corners(position, position + size)
}

/// Inclusive overlap: boxes that share only an edge still count as touching.
pub fn boxes_touch(a: Rect, b: Rect) -> bool {
    a.max.x >= b.min.x && a.min.x <= b.max.x && a.max.y >= b.min.y && a.min.y <= b.max.y
}

/// Attacker's reach box in world space.
pub fn attack_box(attacker: &Fighter) -> Rect {
    box_from(attacker.attack_box_position(), attacker.attack_box_size())
}

/// Target's body box: unscaled sprite width and height at its position.
pub fn body_box(target: &Fighter) -> Rect {
    box_from(
        target.position,
        Vec2::new(target.sprite_width(), target.sprite_height()),
    )
}

/// Does `attacker`'s attack box reach `target`'s body? Pure; no side effects.
pub fn attack_overlaps(attacker: &Fighter, target: &Fighter) -> bool {
    boxes_touch(attack_box(attacker), body_box(target))
}
