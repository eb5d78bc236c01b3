//! Read-only snapshots of fighter state for presentation.
//!
//! The simulation works in screen coordinates (origin top-left, y down);
//! [`to_world`] converts a box into Bevy's centered, y-up space.

use bevy::prelude::*;

use crate::combat::animation::AnimationMode;
use crate::combat::collision::{attack_box, body_box};
use crate::combat::fighter::{Fighter, Side, Tick};
use crate::combat::health::HealthComponent;

pub use crate::combat::log::outcome_label as outcome_text;

/// What the renderer needs from one fighter
#[derive(Debug, Clone, PartialEq)]
pub struct FighterView {
    pub side: Side,
    pub name: String,
    pub position: Vec2,
    pub draw_offset: Vec2,
    pub base_scale: f32,
    pub current_scale: f32,
    /// Unscaled frame size of the current clip
    pub frame_size: Vec2,
    pub body: Rect,
    /// Present only while the strike is live
    pub attack_box: Option<Rect>,
    pub health: HealthComponent,
    pub mode: AnimationMode,
    pub transform_active: bool,
    pub is_dead: bool,
}

impl From<&Fighter> for FighterView {
    fn from(fighter: &Fighter) -> Self {
        Self {
            side: fighter.side(),
            name: fighter.name().to_string(),
            position: fighter.position,
            draw_offset: fighter.draw_offset(),
            base_scale: fighter.base_scale(),
            current_scale: fighter.current_scale(),
            frame_size: Vec2::new(fighter.sprite_width(), fighter.sprite_height()),
            body: body_box(fighter),
            attack_box: fighter.is_attacking().then(|| attack_box(fighter)),
            health: fighter.health,
            mode: fighter.mode(),
            transform_active: fighter.transform_active(),
            is_dead: fighter.is_dead(),
        }
    }
}

impl FighterView {
    /// Top-left of the sprite frame. The offset grows with the transform scale.
    pub fn draw_origin(&self) -> Vec2 {
        self.position - self.draw_offset * (self.current_scale / self.base_scale)
    }

    /// Drawn size of the sprite frame
    pub fn drawn_frame_size(&self) -> Vec2 {
        self.frame_size * self.current_scale
    }

    pub fn health_fraction(&self) -> f32 {
        self.health.fraction()
    }
}

/// Whole seconds left on the clock, rounded up so "0" only shows once time is up.
pub fn timer_text(remaining_ticks: Tick, tick_rate_hz: u32) -> String {
    let rate = u64::from(tick_rate_hz.max(1));
    remaining_ticks.div_ceil(rate).to_string()
}

/// Center of a screen-space box in Bevy world space for an arena of `arena` size
pub fn to_world(rect: Rect, arena: Vec2, z: f32) -> Vec3 {
    let center = rect.center();
    Vec3::new(center.x - arena.x / 2.0, arena.y / 2.0 - center.y, z)
}
