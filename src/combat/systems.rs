//! Combat systems
//!
//! ECS systems that drive the match controller.

use bevy::prelude::*;

use super::log::{CombatLog, CombatLogEventType};
use super::match_controller::MatchController;
use super::{MatchEvent, TickSchedule};
use crate::input::InputTracker;

/// System set labels for ordering input against the simulation tick.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DuelSystemSet {
    /// Read devices or scripts into the [`InputTracker`]
    GatherInput,
    /// Advance the match by one tick
    Simulate,
}

/// Adds the tick system to the chosen schedule.
///
/// `Fixed` also sets the fixed timestep from the configured tick rate.
pub fn add_simulation_systems(app: &mut App, schedule: TickSchedule) {
    match schedule {
        TickSchedule::Fixed => {
            let hz = app
                .world()
                .get_resource::<MatchController>()
                .map(|c| c.config().world.tick_rate_hz)
                .unwrap_or(60);
            app.insert_resource(Time::<Fixed>::from_hz(f64::from(hz)))
                .add_systems(FixedUpdate, run_simulation_tick.in_set(DuelSystemSet::Simulate));
            app.configure_sets(Update, DuelSystemSet::GatherInput);
        }
        TickSchedule::EveryUpdate => {
            app.configure_sets(
                Update,
                (DuelSystemSet::GatherInput, DuelSystemSet::Simulate).chain(),
            )
            .add_systems(Update, run_simulation_tick.in_set(DuelSystemSet::Simulate));
        }
    }
}

/// Log the start of the match
pub fn log_match_start(controller: Res<MatchController>, mut combat_log: ResMut<CombatLog>) {
    combat_log.clear();
    let config = controller.config();
    combat_log.log(
        CombatLogEventType::MatchEvent,
        format!("{} vs {}: fight!", config.left.name, config.right.name),
    );
    info!(
        "Round started: {} ticks at {} Hz",
        config.world.round_duration_ticks, config.world.tick_rate_hz
    );
}

/// Sample input once, run one tick, and publish what happened.
pub fn run_simulation_tick(
    mut controller: ResMut<MatchController>,
    mut tracker: ResMut<InputTracker>,
    mut combat_log: ResMut<CombatLog>,
    mut match_events: EventWriter<MatchEvent>,
) {
    let input = tracker.take_tick_input();
    let events = controller.tick(&input);
    let tick = controller.current_tick();

    for event in events {
        combat_log.record(tick, &event);
        match_events.send(event);
    }
}
