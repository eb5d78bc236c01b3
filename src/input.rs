//! Normalized per-tick input
//!
//! Key events arrive whenever the window delivers them; the simulation samples
//! them once per tick. [`InputTracker`] bridges the two: held directions and
//! the last-pressed direction persist across ticks, while edge-triggered
//! actions (jump, attack, transform, restart) latch until the next tick
//! consumes them.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::fighter::Side;

/// Most recently pressed horizontal direction for one fighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
}

impl Direction {
    /// -1 for left, +1 for right, 0 for none
    pub fn sign(self) -> f32 {
        match self {
            Direction::None => 0.0,
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Something a fighter's controls can do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FighterAction {
    MoveLeft,
    MoveRight,
    Jump,
    Attack,
    Transform,
}

/// One fighter's input snapshot for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FighterInput {
    pub left_held: bool,
    pub right_held: bool,
    pub last_direction: Direction,
    pub jump: bool,
    pub attack: bool,
    pub transform: bool,
}

impl FighterInput {
    /// The direction to move this tick: only a held key that was also the last one pressed.
    ///
    /// Holding right, pressing left, then releasing left leaves the fighter
    /// standing until right is pressed again.
    pub fn active_direction(&self) -> Option<Direction> {
        match self.last_direction {
            Direction::Left if self.left_held => Some(Direction::Left),
            Direction::Right if self.right_held => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Both fighters' input for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickInput {
    pub left: FighterInput,
    pub right: FighterInput,
    pub restart: bool,
}

impl TickInput {
    pub fn fighter(&self, side: Side) -> &FighterInput {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn fighter_mut(&mut self, side: Side) -> &mut FighterInput {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Accumulates key presses between ticks.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputTracker {
    pending: TickInput,
}

impl InputTracker {
    pub fn press(&mut self, side: Side, action: FighterAction) {
        let input = self.pending.fighter_mut(side);
        match action {
            FighterAction::MoveLeft => {
                input.left_held = true;
                input.last_direction = Direction::Left;
            }
            FighterAction::MoveRight => {
                input.right_held = true;
                input.last_direction = Direction::Right;
            }
            FighterAction::Jump => input.jump = true,
            FighterAction::Attack => input.attack = true,
            FighterAction::Transform => input.transform = true,
        }
    }

    /// Key released. Only directions have a held state; the last direction is kept.
    pub fn release(&mut self, side: Side, action: FighterAction) {
        let input = self.pending.fighter_mut(side);
        match action {
            FighterAction::MoveLeft => input.left_held = false,
            FighterAction::MoveRight => input.right_held = false,
            FighterAction::Jump | FighterAction::Attack | FighterAction::Transform => {}
        }
    }

    pub fn press_restart(&mut self) {
        self.pending.restart = true;
    }

    /// Snapshot for the coming tick. Edge events are cleared; held state carries over.
    pub fn take_tick_input(&mut self) -> TickInput {
        let snapshot = self.pending;
        for side in Side::both() {
            let input = self.pending.fighter_mut(side);
            input.jump = false;
            input.attack = false;
            input.transform = false;
        }
        self.pending.restart = false;
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_latch_for_one_tick() {
        let mut tracker = InputTracker::default();
        tracker.press(Side::Left, FighterAction::Attack);
        tracker.press_restart();

        let first = tracker.take_tick_input();
        assert!(first.left.attack);
        assert!(first.restart);

        let second = tracker.take_tick_input();
        assert!(!second.left.attack);
        assert!(!second.restart);
    }

    #[test]
    fn test_held_direction_persists() {
        let mut tracker = InputTracker::default();
        tracker.press(Side::Right, FighterAction::MoveLeft);
        tracker.take_tick_input();
        let input = tracker.take_tick_input();
        assert!(input.right.left_held);
        assert_eq!(input.right.active_direction(), Some(Direction::Left));
    }

    #[test]
    fn test_stale_release_does_not_move() {
        let mut tracker = InputTracker::default();
        tracker.press(Side::Left, FighterAction::MoveRight);
        tracker.press(Side::Left, FighterAction::MoveLeft);
        tracker.release(Side::Left, FighterAction::MoveLeft);

        let input = tracker.take_tick_input();
        assert!(input.left.right_held);
        assert_eq!(input.left.last_direction, Direction::Left);
        assert_eq!(input.left.active_direction(), None);
    }

    #[test]
    fn test_sides_are_independent() {
        let mut tracker = InputTracker::default();
        tracker.press(Side::Left, FighterAction::Jump);
        let input = tracker.take_tick_input();
        assert!(input.left.jump);
        assert!(!input.right.jump);
    }
}
