//! Round state machine and per-tick orchestration.
//!
//! One tick runs, in order:
//! 1. edge inputs (jump, attack, transform) for fighters that are still alive
//! 2. physics for the left fighter, then the right (transform expiry included)
//! 3. movement and mode selection from held input
//! 4. hit resolution for both pairings, decided before either is applied
//! 5. death transitions
//! 6. win check
//!
//! The round is `Running` until a knockout or the clock ends it, then `Over`
//! until a restart. Fighters keep animating while `Over` so a death animation
//! can finish, but input other than restart is ignored and no hits resolve.

use bevy::prelude::*;

use super::animation::AnimationMode;
use super::collision::attack_overlaps;
use super::events::{MatchEvent, RoundEndReason, TickEvents, Winner};
use super::fighter::{Arena, Fighter, Side, Tick};
use crate::config::{ConfigError, DuelConfig};
use crate::input::{FighterInput, TickInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Running,
    Over,
}

/// Owns both fighters and the round clock.
#[derive(Resource, Debug, Clone)]
pub struct MatchController {
    config: DuelConfig,
    arena: Arena,
    left: Fighter,
    right: Fighter,
    /// Fresh copies used on restart
    initial: [Fighter; 2],
    tick: Tick,
    clock_start_tick: Tick,
    phase: RoundPhase,
    winner: Option<Winner>,
    end_reason: Option<RoundEndReason>,
}

impl MatchController {
    /// Validate the config and set up a fresh round.
    pub fn new(config: DuelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let left = Fighter::new(Side::Left, &config.left, &config.world)?;
        let right = Fighter::new(Side::Right, &config.right, &config.world)?;

        info!("Match ready: {} vs {}", left.name(), right.name());

        Ok(Self {
            arena: Arena::from(&config.world),
            initial: [left.clone(), right.clone()],
            left,
            right,
            config,
            tick: 0,
            clock_start_tick: 0,
            phase: RoundPhase::Running,
            winner: None,
            end_reason: None,
        })
    }

    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    pub fn fighter(&self, side: Side) -> &Fighter {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn fighter_mut(&mut self, side: Side) -> &mut Fighter {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::Over
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn end_reason(&self) -> Option<RoundEndReason> {
        self.end_reason
    }

    /// Ticks since the round clock started.
    pub fn elapsed_ticks(&self) -> Tick {
        self.tick - self.clock_start_tick
    }

    pub fn remaining_ticks(&self) -> Tick {
        self.config
            .world
            .round_duration_ticks
            .saturating_sub(self.elapsed_ticks())
    }

    pub fn clock_expired(&self) -> bool {
        self.elapsed_ticks() >= self.config.world.round_duration_ticks
    }

    /// Run one simulation tick.
    pub fn tick(&mut self, input: &TickInput) -> TickEvents {
        let mut events = TickEvents::new();

        if self.phase == RoundPhase::Over && input.restart {
            self.restart();
            events.push(MatchEvent::Restarted);
            return events;
        }

        let input = match self.phase {
            RoundPhase::Running => *input,
            RoundPhase::Over => TickInput::default(),
        };

        self.tick += 1;
        let now = self.tick;

        for side in Side::both() {
            self.apply_edge_input(side, input.fighter(side), now, &mut events);
        }

        let was_dead = [self.left.is_dead(), self.right.is_dead()];

        let arena = self.arena;
        for side in Side::both() {
            if self.fighter_mut(side).advance(&arena, now) {
                info!("{} transformation expired", side.label());
                events.push(MatchEvent::TransformExpired { side });
            }
        }

        let move_speed = self.config.world.move_speed;
        self.left.apply_movement(&input.left, move_speed);
        self.right.apply_movement(&input.right, move_speed);

        if self.phase == RoundPhase::Running {
            self.resolve_hits(&mut events);
        }

        for side in Side::both() {
            let fighter = self.fighter_mut(side);
            if fighter.health.is_depleted() && !fighter.is_dead() {
                fighter.switch_mode(AnimationMode::Death);
            }
        }

        for (side, was) in Side::both().into_iter().zip(was_dead) {
            if !was && self.fighter(side).is_dead() {
                events.push(MatchEvent::Died { side });
            }
        }

        if self.phase == RoundPhase::Running {
            self.check_round_end(&mut events);
        }

        events
    }

    fn apply_edge_input(
        &mut self,
        side: Side,
        input: &FighterInput,
        now: Tick,
        events: &mut TickEvents,
    ) {
        let jump_velocity = self.config.world.jump_velocity;
        let max_transforms = self.config.world.max_transforms;
        let fighter = self.fighter_mut(side);
        if fighter.is_dead() {
            return;
        }

        if input.jump && fighter.jump(jump_velocity) {
            events.push(MatchEvent::Jumped { side });
        }
        if input.attack && fighter.attack() {
            events.push(MatchEvent::AttackStarted { side });
        }
        if input.transform && fighter.transform(now) {
            let uses_left = max_transforms.saturating_sub(fighter.transform_count());
            let ends_at = fighter.transform_end_tick().unwrap_or(now);
            info!(
                "{} transformed until tick {} ({} uses left)",
                side.label(),
                ends_at,
                uses_left
            );
            events.push(MatchEvent::TransformStarted {
                side,
                ends_at,
                uses_left,
            });
        }
    }

    /// Decide both pairings against pre-hit state, then apply, so mutual hits land together.
    fn resolve_hits(&mut self, events: &mut TickEvents) {
        let left_lands = self.left.strike_ready() && attack_overlaps(&self.left, &self.right);
        let right_lands = self.right.strike_ready() && attack_overlaps(&self.right, &self.left);
        let left_damage = self.left.damage();
        let right_damage = self.right.damage();

        if left_lands {
            events.push(Self::land_hit(&mut self.right, Side::Left, left_damage));
        }
        if right_lands {
            events.push(Self::land_hit(&mut self.left, Side::Right, right_damage));
        }

        self.left.end_strike();
        self.right.end_strike();
    }

    fn land_hit(target: &mut Fighter, attacker: Side, damage: f32) -> MatchEvent {
        let target_side = target.side();
        if target.take_hit(damage) {
            debug!(
                "{} hit {} for {:.0} ({:.0} left)",
                attacker.label(),
                target_side.label(),
                damage,
                target.health.current()
            );
            MatchEvent::Hit {
                attacker,
                target: target_side,
                damage,
                remaining_hp: target.health.current(),
            }
        } else {
            MatchEvent::HitAbsorbed {
                attacker,
                target: target_side,
            }
        }
    }

    fn check_round_end(&mut self, events: &mut TickEvents) {
        let knocked_out = self.left.health.is_depleted() || self.right.health.is_depleted();
        let reason = if knocked_out {
            RoundEndReason::KnockOut
        } else if self.clock_expired() {
            RoundEndReason::TimeUp
        } else {
            return;
        };

        let winner = Winner::from_hp(self.left.health.current(), self.right.health.current());
        self.phase = RoundPhase::Over;
        self.winner = Some(winner);
        self.end_reason = Some(reason);
        info!(
            "Round over at tick {} ({:?}): {:?}",
            self.elapsed_ticks(),
            reason,
            winner
        );
        events.push(MatchEvent::RoundOver { winner, reason });
    }

    /// Reinitialize both fighters and the clock. Only valid once the round is over.
    fn restart(&mut self) {
        let [left, right] = self.initial.clone();
        self.left = left;
        self.right = right;
        self.clock_start_tick = self.tick;
        self.phase = RoundPhase::Running;
        self.winner = None;
        self.end_reason = None;
        info!("Round restarted at tick {}", self.tick);
    }
}
