//! Arena rendering
//!
//! Fighters are drawn as flat colored quads: the sprite frame, the body box,
//! and the attack box while a strike is live. Quads are re-synced from the
//! match controller every frame.

use bevy::prelude::*;

use super::view::{to_world, FighterView};
use crate::combat::animation::AnimationMode;
use crate::combat::fighter::Side;
use crate::combat::MatchController;
use crate::ui::colors;

/// Which part of a fighter a quad shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadPart {
    Frame,
    Body,
    AttackBox,
}

impl QuadPart {
    fn z(self) -> f32 {
        match self {
            QuadPart::Frame => 1.0,
            QuadPart::Body => 2.0,
            QuadPart::AttackBox => 3.0,
        }
    }
}

/// One quad belonging to a fighter
#[derive(Component, Debug, Clone, Copy)]
pub struct FighterQuad {
    pub side: Side,
    pub part: QuadPart,
}

/// Marker for the floor strip
#[derive(Component)]
pub struct Floor;

/// Spawn the floor and three quads per fighter.
pub fn setup_arena(mut commands: Commands, controller: Res<MatchController>) {
    let world = &controller.config().world;
    let arena = Vec2::new(world.width, world.height);
    let floor = Rect::from_corners(Vec2::new(0.0, world.ground_y()), arena);

    commands.spawn((
        Sprite::from_color(colors::FLOOR, floor.size()),
        Transform::from_translation(to_world(floor, arena, 0.0)),
        Floor,
    ));

    for side in Side::both() {
        for part in [QuadPart::Frame, QuadPart::Body, QuadPart::AttackBox] {
            commands.spawn((
                Sprite::from_color(Color::NONE, Vec2::ONE),
                Transform::default(),
                Visibility::Hidden,
                FighterQuad { side, part },
            ));
        }
    }

    info!("Arena ready: {}x{}, floor at y={}", world.width, world.height, world.ground_y());
}

/// Body color for the fighter's current state
pub fn body_color(view: &FighterView) -> Color {
    if view.is_dead || view.mode == AnimationMode::Death {
        colors::DEFEATED
    } else if view.mode == AnimationMode::TakeHit {
        colors::HIT_FLASH
    } else if view.transform_active {
        colors::TRANSFORMED
    } else {
        match view.side {
            Side::Left => colors::PLAYER_1,
            Side::Right => colors::PLAYER_2,
        }
    }
}

/// Copy fighter state onto the quads
pub fn sync_fighter_quads(
    controller: Res<MatchController>,
    mut quads: Query<(&FighterQuad, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    let world = &controller.config().world;
    let arena = Vec2::new(world.width, world.height);
    let views = Side::both().map(|side| FighterView::from(controller.fighter(side)));

    for (quad, mut sprite, mut transform, mut visibility) in &mut quads {
        let view = match quad.side {
            Side::Left => &views[0],
            Side::Right => &views[1],
        };

        let (rect, color) = match quad.part {
            QuadPart::Frame => {
                let origin = view.draw_origin();
                (
                    Some(Rect::from_corners(origin, origin + view.drawn_frame_size())),
                    colors::FRAME,
                )
            }
            QuadPart::Body => (Some(view.body), body_color(view)),
            QuadPart::AttackBox => (view.attack_box, colors::ATTACK_BOX),
        };

        let Some(rect) = rect else {
            *visibility = Visibility::Hidden;
            continue;
        };

        sprite.color = color;
        sprite.custom_size = Some(rect.size());
        transform.translation = to_world(rect, arena, quad.part.z());
        *visibility = Visibility::Inherited;
    }
}
