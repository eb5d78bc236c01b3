//! Integration tests for the match controller
//!
//! These tests verify that:
//! - Mutual strikes on the same tick both land, once
//! - The clock and knockouts end the round with the right winner
//! - Restart is the only way out of a finished round
//! - Invariants hold under long runs of seeded random input

use rand::prelude::*;
use rand::rngs::StdRng;

use duelsim::combat::animation::AnimationMode;
use duelsim::combat::events::{MatchEvent, RoundEndReason, Winner};
use duelsim::combat::fighter::Side;
use duelsim::combat::{MatchController, RoundPhase};
use duelsim::config::{DuelConfig, FighterConfig, WorldConfig};
use duelsim::input::{FighterInput, TickInput};

fn default_controller() -> MatchController {
    MatchController::new(DuelConfig::default()).expect("default config is valid")
}

/// Both fighters standing on the floor, close enough that each reaches the other.
fn face_off_config() -> DuelConfig {
    let world = WorldConfig::default();
    let floor_y = world.ground_y() - 200.0;

    let mut left = FighterConfig::samurai_mack();
    left.start_position = (300.0, floor_y);
    left.active_frame = 2;

    let mut right = FighterConfig::kenji();
    right.start_position = (400.0, floor_y);

    DuelConfig { world, left, right }
}

fn both_attack() -> TickInput {
    TickInput {
        left: FighterInput {
            attack: true,
            ..Default::default()
        },
        right: FighterInput {
            attack: true,
            ..Default::default()
        },
        restart: false,
    }
}

fn idle() -> TickInput {
    TickInput::default()
}

fn restart() -> TickInput {
    TickInput {
        restart: true,
        ..Default::default()
    }
}

fn hits(events: &[MatchEvent]) -> Vec<(Side, Side)> {
    events
        .iter()
        .filter_map(|e| match e {
            MatchEvent::Hit { attacker, target, .. } => Some((*attacker, *target)),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Hit resolution
// =============================================================================

#[test]
fn test_mutual_strikes_land_on_the_same_tick() {
    let mut controller = MatchController::new(face_off_config()).unwrap();

    let events = controller.tick(&both_attack());
    assert!(events.contains(&MatchEvent::AttackStarted { side: Side::Left }));
    assert!(events.contains(&MatchEvent::AttackStarted { side: Side::Right }));

    let mut landed = Vec::new();
    for _ in 0..30 {
        let events = controller.tick(&idle());
        landed = hits(&events);
        if !landed.is_empty() {
            break;
        }
    }

    assert_eq!(landed.len(), 2, "both strikes land together");
    assert!(landed.contains(&(Side::Left, Side::Right)));
    assert!(landed.contains(&(Side::Right, Side::Left)));
    assert_eq!(controller.fighter(Side::Left).health.current(), 80.0);
    assert_eq!(controller.fighter(Side::Right).health.current(), 80.0);

    for _ in 0..60 {
        let events = controller.tick(&idle());
        assert!(hits(&events).is_empty(), "a swing connects at most once");
    }
    assert_eq!(controller.fighter(Side::Left).health.current(), 80.0);
    assert_eq!(controller.fighter(Side::Right).health.current(), 80.0);
}

#[test]
fn test_out_of_range_swing_misses() {
    let mut controller = default_controller();
    controller.tick(&both_attack());
    for _ in 0..60 {
        let events = controller.tick(&idle());
        assert!(hits(&events).is_empty());
    }
    assert_eq!(controller.fighter(Side::Left).health.current(), 100.0);
    assert_eq!(controller.fighter(Side::Right).health.current(), 100.0);
}

// =============================================================================
// Round end
// =============================================================================

#[test]
fn test_equal_health_at_time_up_is_a_tie() {
    let mut config = DuelConfig::default();
    config.world.round_duration_ticks = 30;
    let mut controller = MatchController::new(config).unwrap();

    for _ in 0..29 {
        controller.tick(&idle());
        assert_eq!(controller.phase(), RoundPhase::Running);
    }
    let events = controller.tick(&idle());
    assert!(events.contains(&MatchEvent::RoundOver {
        winner: Winner::Tie,
        reason: RoundEndReason::TimeUp,
    }));
    assert_eq!(controller.remaining_ticks(), 0);
    assert!(controller.is_over());
}

#[test]
fn test_time_up_favors_higher_health() {
    let mut config = DuelConfig::default();
    config.world.round_duration_ticks = 10;
    let mut controller = MatchController::new(config).unwrap();
    controller.fighter_mut(Side::Left).health.take_damage(30.0);

    for _ in 0..10 {
        controller.tick(&idle());
    }
    assert_eq!(controller.winner(), Some(Winner::Right));
    assert_eq!(controller.end_reason(), Some(RoundEndReason::TimeUp));
}

#[test]
fn test_knockout_ends_round_then_death_plays_out() {
    let mut controller = default_controller();
    controller.fighter_mut(Side::Left).health.take_damage(100.0);

    let events = controller.tick(&idle());
    assert!(events.contains(&MatchEvent::RoundOver {
        winner: Winner::Right,
        reason: RoundEndReason::KnockOut,
    }));
    assert_eq!(controller.fighter(Side::Left).mode(), AnimationMode::Death);

    let mut died_at = None;
    for _ in 0..100 {
        let events = controller.tick(&idle());
        if events.contains(&MatchEvent::Died { side: Side::Left }) {
            died_at = Some(controller.current_tick());
        }
        assert!(
            !events.iter().any(|e| matches!(e, MatchEvent::RoundOver { .. })),
            "the round ends once"
        );
    }
    assert!(died_at.is_some());
    assert!(controller.fighter(Side::Left).is_dead());
    assert_eq!(controller.winner(), Some(Winner::Right));
}

#[test]
fn test_double_knockout_is_a_tie() {
    let mut controller = default_controller();
    controller.fighter_mut(Side::Left).health.take_damage(100.0);
    controller.fighter_mut(Side::Right).health.take_damage(100.0);

    controller.tick(&idle());
    assert_eq!(controller.winner(), Some(Winner::Tie));
    assert_eq!(controller.end_reason(), Some(RoundEndReason::KnockOut));
}

#[test]
fn test_input_ignored_while_over() {
    let mut controller = default_controller();
    controller.fighter_mut(Side::Left).health.take_damage(100.0);
    controller.tick(&idle());
    assert!(controller.is_over());

    let mut jump = TickInput::default();
    jump.right.jump = true;
    let events = controller.tick(&jump);
    assert!(!events.contains(&MatchEvent::Jumped { side: Side::Right }));
}

// =============================================================================
// Restart
// =============================================================================

#[test]
fn test_restart_resets_fighters_and_clock() {
    let mut controller = default_controller();
    controller.fighter_mut(Side::Left).health.take_damage(100.0);
    for _ in 0..50 {
        controller.tick(&idle());
    }
    assert!(controller.fighter(Side::Left).is_dead());
    let tick_before = controller.current_tick();

    let events = controller.tick(&restart());
    assert_eq!(events.as_slice(), &[MatchEvent::Restarted]);
    assert_eq!(controller.current_tick(), tick_before);
    assert_eq!(controller.phase(), RoundPhase::Running);
    assert_eq!(controller.winner(), None);
    assert_eq!(controller.remaining_ticks(), 3600);

    let left = controller.fighter(Side::Left);
    assert!(!left.is_dead());
    assert_eq!(left.health.current(), 100.0);
    assert_eq!(left.mode(), AnimationMode::Idle);
    assert_eq!(left.transform_count(), 0);

    controller.tick(&idle());
    assert_eq!(controller.elapsed_ticks(), 1);
}

// =============================================================================
// Edge input
// =============================================================================

#[test]
fn test_jump_and_transform_events() {
    let mut controller = default_controller();

    let mut input = TickInput::default();
    input.left.jump = true;
    input.right.transform = true;
    let events = controller.tick(&input);

    assert!(events.contains(&MatchEvent::Jumped { side: Side::Left }));
    assert!(events.contains(&MatchEvent::TransformStarted {
        side: Side::Right,
        ends_at: 301,
        uses_left: 1,
    }));

    let mut expired_at = None;
    for _ in 0..400 {
        let events = controller.tick(&idle());
        if events.contains(&MatchEvent::TransformExpired { side: Side::Right }) {
            expired_at = Some(controller.current_tick());
        }
    }
    assert_eq!(expired_at, Some(301));
    assert!(!controller.fighter(Side::Right).transform_active());
}

#[test]
fn test_dead_fighter_ignores_actions() {
    let mut controller = default_controller();
    controller.fighter_mut(Side::Right).health.take_damage(100.0);
    for _ in 0..80 {
        controller.tick(&idle());
    }
    assert!(controller.fighter(Side::Right).is_dead());

    let mut input = TickInput::default();
    input.right.jump = true;
    input.right.attack = true;
    input.right.transform = true;
    controller.tick(&input);

    let right = controller.fighter(Side::Right);
    assert_eq!(right.mode(), AnimationMode::Death);
    assert_eq!(right.transform_count(), 0);
}

// =============================================================================
// Invariants under random input
// =============================================================================

fn random_fighter_input(rng: &mut StdRng, held: &mut FighterInput) -> FighterInput {
    use duelsim::input::Direction;

    match rng.gen_range(0..20) {
        0 => {
            held.left_held = true;
            held.last_direction = Direction::Left;
        }
        1 => {
            held.right_held = true;
            held.last_direction = Direction::Right;
        }
        2 => held.left_held = false,
        3 => held.right_held = false,
        _ => {}
    }
    FighterInput {
        jump: rng.gen_bool(0.03),
        attack: rng.gen_bool(0.08),
        transform: rng.gen_bool(0.005),
        ..*held
    }
}

#[test]
fn test_invariants_hold_under_random_input() {
    for seed in [1_u64, 7, 42, 1234] {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut controller = default_controller();
        let mut held = [FighterInput::default(); 2];
        let mut was_dead = [false; 2];

        for _ in 0..6000 {
            let input = TickInput {
                left: random_fighter_input(&mut rng, &mut held[0]),
                right: random_fighter_input(&mut rng, &mut held[1]),
                restart: controller.is_over() && rng.gen_bool(0.01),
            };
            let events = controller.tick(&input);
            let restarted = events.contains(&MatchEvent::Restarted);

            for (i, side) in Side::both().into_iter().enumerate() {
                let fighter = controller.fighter(side);
                let hp = fighter.health.current();
                assert!((0.0..=fighter.health.max()).contains(&hp), "seed {seed}: hp {hp}");
                assert!(fighter.frame_index() < fighter.frames_max(), "seed {seed}");
                assert!(fighter.transform_count() <= 2, "seed {seed}");
                assert!(fighter.jumps_left() <= fighter.max_jumps(), "seed {seed}");

                if was_dead[i] && !restarted {
                    assert!(fighter.is_dead(), "seed {seed}: {side:?} came back to life");
                    assert_eq!(fighter.mode(), AnimationMode::Death);
                }
                was_dead[i] = fighter.is_dead();
            }
        }
    }
}
