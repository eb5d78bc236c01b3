//! Combat system
//!
//! Implements the fighter simulation:
//! - Hit points and invincibility
//! - Physics, jump budget and floor contact
//! - Animation modes with a guarded state machine
//! - Frame-gated attack collision and damage
//! - The timed transformation power-up
//! - The round clock and win conditions
//!
//! The simulation types are plain structs; [`DuelPlugin`] wires them into Bevy.

use bevy::prelude::*;

pub mod animation;
pub mod collision;
pub mod events;
pub mod fighter;
pub mod health;
pub mod log;
pub mod match_controller;
pub mod systems;

pub use events::{MatchEvent, RoundEndReason, Winner};
pub use fighter::{Fighter, Side, Tick};
pub use match_controller::{MatchController, RoundPhase};

use crate::input::InputTracker;
use systems::*;

/// Where the simulation tick runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSchedule {
    /// `FixedUpdate` at the configured tick rate (windowed play)
    Fixed,
    /// One tick per `App::update()` (headless, deterministic)
    EveryUpdate,
}

/// Plugin for the duel simulation
pub struct DuelPlugin {
    pub controller: MatchController,
    pub schedule: TickSchedule,
}

impl Plugin for DuelPlugin {
    fn build(&self, app: &mut App) {
        app
            // Match events
            .add_event::<MatchEvent>()
            // Resources
            .insert_resource(self.controller.clone())
            .init_resource::<InputTracker>()
            .init_resource::<log::CombatLog>()
            .add_systems(Startup, log_match_start);

        add_simulation_systems(app, self.schedule);
    }
}
