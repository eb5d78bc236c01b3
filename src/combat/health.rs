//! Hit points for a single fighter.

use serde::{Deserialize, Serialize};

/// Hit-point pool with an invincibility flag.
///
/// `current` stays within `0.0..=max` no matter what is applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthComponent {
    max: f32,
    current: f32,
    /// While set, `take_damage` is ignored
    pub invincible: bool,
}

impl HealthComponent {
    /// Create a full health pool.
    pub fn new(max_hp: f32) -> Self {
        let max = max_hp.max(0.0);
        Self {
            max,
            current: max,
            invincible: false,
        }
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Fraction of health remaining, used by health bars.
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Apply damage. Returns true if the damage was applied (not absorbed by invincibility).
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.invincible {
            return false;
        }
        self.current = (self.current - amount).max(0.0);
        true
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }
}
