//! Play Match
//!
//! Windowed presentation of a duel: the camera, the fighter quads, the HUD
//! and keyboard input. The simulation itself lives in [`crate::combat`].

use bevy::prelude::*;

pub mod hud;
pub mod rendering;
pub mod view;

use crate::camera::CameraPlugin;
use crate::combat::systems::DuelSystemSet;
use crate::keybindings::gather_keyboard_input;
use hud::{render_combat_feed, render_hud};
use rendering::{setup_arena, sync_fighter_quads};

/// Plugin for the windowed match
///
/// Expects `EguiPlugin`, the settings plugin and `DuelPlugin` to be installed.
pub struct PlayMatchPlugin;

impl Plugin for PlayMatchPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CameraPlugin)
            .add_systems(Startup, setup_arena)
            .add_systems(
                Update,
                (
                    gather_keyboard_input.in_set(DuelSystemSet::GatherInput),
                    sync_fighter_quads,
                    (render_hud, render_combat_feed),
                ),
            );
    }
}
