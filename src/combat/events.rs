//! Match events
//!
//! Produced by the match controller each tick; forwarded to Bevy's event queue
//! and recorded in the combat log.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::fighter::{Side, Tick};

/// Events raised during a single tick. Most ticks raise none or one.
pub type TickEvents = SmallVec<[MatchEvent; 4]>;

/// Outcome of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Left,
    Right,
    Tie,
}

impl Winner {
    /// Compare hit points at the moment the round ends.
    pub fn from_hp(left_hp: f32, right_hp: f32) -> Self {
        if left_hp == right_hp {
            Winner::Tie
        } else if left_hp > right_hp {
            Winner::Left
        } else {
            Winner::Right
        }
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Winner::Left => Some(Side::Left),
            Winner::Right => Some(Side::Right),
            Winner::Tie => None,
        }
    }
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEndReason {
    /// A fighter's hit points reached zero
    KnockOut,
    /// The round clock ran out
    TimeUp,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub enum MatchEvent {
    Jumped {
        side: Side,
    },
    AttackStarted {
        side: Side,
    },
    /// An attack connected and the damage went through
    Hit {
        attacker: Side,
        target: Side,
        damage: f32,
        remaining_hp: f32,
    },
    /// An attack connected against an invincible target
    HitAbsorbed {
        attacker: Side,
        target: Side,
    },
    TransformStarted {
        side: Side,
        ends_at: Tick,
        uses_left: u32,
    },
    TransformExpired {
        side: Side,
    },
    /// The death animation finished
    Died {
        side: Side,
    },
    RoundOver {
        winner: Winner,
        reason: RoundEndReason,
    },
    Restarted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_from_hp() {
        assert_eq!(Winner::from_hp(40.0, 40.0), Winner::Tie);
        assert_eq!(Winner::from_hp(0.0, 0.0), Winner::Tie);
        assert_eq!(Winner::from_hp(60.0, 20.0), Winner::Left);
        assert_eq!(Winner::from_hp(0.0, 20.0), Winner::Right);
    }
}
