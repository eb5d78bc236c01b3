//! Camera system
//!
//! A fixed 2D camera that always shows the whole arena, letterboxed when the
//! window aspect differs from the arena's.

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use crate::combat::MatchController;
use crate::ui::colors;

/// Plugin for camera management
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(colors::BACKGROUND))
            .add_systems(Startup, setup_camera);
    }
}

/// Marker component for the arena camera
#[derive(Component)]
pub struct MainCamera;

/// Projection that fits an arena of `width` × `height` inside the window
pub fn arena_projection(width: f32, height: f32) -> OrthographicProjection {
    OrthographicProjection {
        scaling_mode: ScalingMode::AutoMin {
            min_width: width,
            min_height: height,
        },
        ..OrthographicProjection::default_2d()
    }
}

fn setup_camera(mut commands: Commands, controller: Res<MatchController>) {
    let world = &controller.config().world;
    commands.spawn((
        Camera2d,
        arena_projection(world.width, world.height),
        MainCamera,
    ));
}
