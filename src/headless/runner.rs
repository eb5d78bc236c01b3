//! Headless match execution
//!
//! Runs a duel without any graphical output, one tick per `App::update()`,
//! suitable for automated testing.

use bevy::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::path::Path;

use crate::combat::fighter::{Fighter, Side, Tick};
use crate::combat::log::{CombatLog, FighterMetadata, MatchMetadata};
use crate::combat::systems::DuelSystemSet;
use crate::combat::{DuelPlugin, MatchController, RoundEndReason, TickSchedule, Winner};
use crate::input::{FighterAction, InputTracker};

use super::config::{HeadlessMatchConfig, ScriptedInput};

/// Result of a completed headless match
///
/// This struct provides programmatic access to match results for testing and analysis.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Round outcome, or None if `max_ticks` ran out first
    pub winner: Option<Winner>,
    pub end_reason: Option<RoundEndReason>,
    /// Ticks simulated since the last (re)start
    pub ticks: Tick,
    /// Updates the app ran for
    pub updates: u64,
    pub left: FighterResult,
    pub right: FighterResult,
    /// Random seed used (if randomly driven)
    pub random_seed: Option<u64>,
    /// Where the combat log was written, if it was
    pub log_path: Option<String>,
}

/// Statistics for a single fighter after the match
#[derive(Debug, Clone)]
pub struct FighterResult {
    pub name: String,
    pub max_health: f32,
    /// Health remaining at match end
    pub final_health: f32,
    /// Whether the death animation completed
    pub is_dead: bool,
    pub transforms_used: u32,
    /// Total damage dealt during the match
    pub damage_dealt: f32,
    /// Connecting attacks, absorbed ones included
    pub hits_landed: usize,
}

impl FighterResult {
    fn collect(fighter: &Fighter, log: &CombatLog) -> Self {
        Self {
            name: fighter.name().to_string(),
            max_health: fighter.health.max(),
            final_health: fighter.health.current(),
            is_dead: fighter.is_dead(),
            transforms_used: fighter.transform_count(),
            damage_dealt: log.damage_dealt_by(fighter.side()),
            hits_landed: log.hits_landed_by(fighter.side()),
        }
    }
}

/// Resource to track headless match state
#[derive(Resource)]
pub struct HeadlessMatchState {
    /// Updates to run before giving up on a result
    pub max_ticks: u64,
    /// Updates run so far
    pub updates: u64,
    /// Custom output path for match log
    pub output_path: Option<String>,
    /// Scripted key transitions, sorted by tick
    script: Vec<ScriptedInput>,
    /// Next script entry to apply
    cursor: usize,
    /// Whether the match has completed
    pub match_complete: bool,
    pub random_seed: Option<u64>,
    /// Match result (populated when match completes)
    pub result: Option<MatchResult>,
}

impl HeadlessMatchState {
    pub fn script_exhausted(&self) -> bool {
        self.cursor >= self.script.len()
    }
}

/// Seeded random input for both fighters.
///
/// The same seed always produces the same key sequence, and since the
/// simulation is deterministic, the same match.
#[derive(Resource)]
pub struct RandomPilot {
    rng: StdRng,
}

impl RandomPilot {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Roll this update's key transitions for one fighter
    pub fn drive(&mut self, tracker: &mut InputTracker, side: Side) {
        let roll: f32 = self.rng.gen();
        if roll < 0.04 {
            tracker.press(side, FighterAction::MoveLeft);
        } else if roll < 0.08 {
            tracker.press(side, FighterAction::MoveRight);
        } else if roll < 0.10 {
            tracker.release(side, FighterAction::MoveLeft);
            tracker.release(side, FighterAction::MoveRight);
        }

        if self.rng.gen_bool(0.02) {
            tracker.press(side, FighterAction::Jump);
        }
        if self.rng.gen_bool(0.06) {
            tracker.press(side, FighterAction::Attack);
        }
        if self.rng.gen_bool(0.003) {
            tracker.press(side, FighterAction::Transform);
        }
    }
}

/// Plugin for headless match execution
///
/// Expects [`DuelPlugin`] with [`TickSchedule::EveryUpdate`] to be installed as well.
pub struct HeadlessPlugin {
    pub config: HeadlessMatchConfig,
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(HeadlessMatchState {
            max_ticks: self.config.max_ticks,
            updates: 0,
            output_path: self.config.output_path.clone(),
            script: self.config.sorted_script(),
            cursor: 0,
            match_complete: false,
            random_seed: self.config.random_seed,
            result: None,
        });

        match self.config.random_seed {
            Some(seed) => {
                info!("Using random input with seed: {}", seed);
                app.insert_resource(RandomPilot::from_seed(seed));
            }
            None => info!("No seed provided, fighters follow the script only"),
        }

        app.add_systems(
            Update,
            (
                (headless_feed_script, headless_random_input)
                    .chain()
                    .in_set(DuelSystemSet::GatherInput),
                headless_check_match_end.after(DuelSystemSet::Simulate),
            ),
        );
    }
}

/// Apply script entries due on the coming tick
fn headless_feed_script(
    controller: Res<MatchController>,
    mut state: ResMut<HeadlessMatchState>,
    mut tracker: ResMut<InputTracker>,
) {
    let next_tick = controller.current_tick() + 1;
    while let Some(entry) = state.script.get(state.cursor).copied() {
        if entry.tick > next_tick {
            break;
        }
        state.cursor += 1;

        if entry.action.is_key_down() && controller.fighter(entry.side).is_dead() {
            debug!("Dropped {:?} for dead {}", entry.action, entry.side.label());
            continue;
        }
        entry.action.apply(&mut tracker, entry.side);
    }
}

fn headless_random_input(
    controller: Res<MatchController>,
    pilot: Option<ResMut<RandomPilot>>,
    mut tracker: ResMut<InputTracker>,
) {
    let Some(mut pilot) = pilot else {
        return;
    };
    if controller.is_over() {
        return;
    }
    for side in Side::both() {
        if !controller.fighter(side).is_dead() {
            pilot.drive(&mut tracker, side);
        }
    }
}

/// Finish when the round is over and nothing scripted is left, or on timeout
fn headless_check_match_end(
    controller: Res<MatchController>,
    combat_log: Res<CombatLog>,
    mut state: ResMut<HeadlessMatchState>,
) {
    if state.match_complete {
        return;
    }
    state.updates += 1;

    let finished = controller.is_over() && state.script_exhausted();
    let timed_out = state.updates >= state.max_ticks;
    if !finished && !timed_out {
        return;
    }

    if finished {
        info!(
            "Match ended after {} ticks: {:?}",
            controller.elapsed_ticks(),
            controller.winner()
        );
    } else {
        info!("Stopped after {} updates with the round unresolved", state.updates);
    }

    let log_path = save_headless_match_log(&controller, &combat_log, state.output_path.as_deref());
    state.result = Some(MatchResult {
        winner: controller.winner(),
        end_reason: controller.end_reason(),
        ticks: controller.elapsed_ticks(),
        updates: state.updates,
        left: FighterResult::collect(controller.fighter(Side::Left), &combat_log),
        right: FighterResult::collect(controller.fighter(Side::Right), &combat_log),
        random_seed: state.random_seed,
        log_path,
    });
    state.match_complete = true;
}

/// Save the combat log when an output path was given
fn save_headless_match_log(
    controller: &MatchController,
    combat_log: &CombatLog,
    output_path: Option<&str>,
) -> Option<String> {
    let output_path = output_path?;
    let metadata = MatchMetadata {
        winner: controller.winner(),
        reason: controller.end_reason(),
        ticks: controller.elapsed_ticks(),
        left: FighterMetadata::from(controller.fighter(Side::Left)),
        right: FighterMetadata::from(controller.fighter(Side::Right)),
    };

    match combat_log.save_to_file(&metadata, Path::new(output_path)) {
        Ok(path) => Some(path),
        Err(e) => {
            error!("Failed to save combat log: {}", e);
            None
        }
    }
}

/// Run a headless match with the given configuration
pub fn run_headless_match(config: HeadlessMatchConfig) -> Result<MatchResult, String> {
    config.validate()?;
    let duel_config = config.to_duel_config()?;
    let controller = MatchController::new(duel_config).map_err(|e| e.to_string())?;

    let mut app = App::new();
    app
        // Minimal plugins - no window, no rendering
        .add_plugins(MinimalPlugins)
        .add_plugins(DuelPlugin {
            controller,
            schedule: TickSchedule::EveryUpdate,
        })
        .add_plugins(HeadlessPlugin { config });

    app.finish();
    app.cleanup();

    loop {
        app.update();
        let state = app.world().resource::<HeadlessMatchState>();
        if let Some(result) = &state.result {
            return Ok(result.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_pilot_is_deterministic() {
        let mut a = RandomPilot::from_seed(7);
        let mut b = RandomPilot::from_seed(7);
        let mut tracker_a = InputTracker::default();
        let mut tracker_b = InputTracker::default();

        for _ in 0..200 {
            a.drive(&mut tracker_a, Side::Left);
            b.drive(&mut tracker_b, Side::Left);
            assert_eq!(tracker_a.take_tick_input(), tracker_b.take_tick_input());
        }
    }
}
