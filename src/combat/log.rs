//! Combat logging
//!
//! Records match events for the HUD and for post-match analysis.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::events::{MatchEvent, RoundEndReason, Winner};
use super::fighter::{Fighter, Side, Tick};

/// A single entry in the combat log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatLogEntry {
    /// Tick the event happened on
    pub tick: Tick,
    /// The type of event
    pub event_type: CombatLogEventType,
    /// Human-readable description of the event
    pub message: String,
    /// Fighter that caused the event, if any
    #[serde(default)]
    pub source: Option<Side>,
    /// Fighter the event happened to, if different from the source
    #[serde(default)]
    pub target: Option<Side>,
    /// Damage amount for damage entries
    #[serde(default)]
    pub amount: Option<f32>,
}

/// Types of combat log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatLogEventType {
    /// Damage dealt
    Damage,
    /// Hit landed on an invincible fighter
    Absorbed,
    /// Jumps and attack starts
    Action,
    /// Transformation started
    Transform,
    /// Transformation ran out
    TransformExpired,
    /// Fighter died
    Death,
    /// Match event (start, end, restart)
    MatchEvent,
}

/// The combat log resource storing all events
#[derive(Resource, Default, Debug, Clone)]
pub struct CombatLog {
    /// All log entries in chronological order
    pub entries: Vec<CombatLogEntry>,
    /// Tick of the most recent entry
    pub match_tick: Tick,
}

/// End-of-match summary for one fighter, saved alongside the log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FighterMetadata {
    pub name: String,
    pub max_hp: f32,
    pub final_hp: f32,
    pub is_dead: bool,
    pub transforms_used: u32,
    pub final_position: (f32, f32),
}

impl From<&Fighter> for FighterMetadata {
    fn from(fighter: &Fighter) -> Self {
        Self {
            name: fighter.name().to_string(),
            max_hp: fighter.health.max(),
            final_hp: fighter.health.current(),
            is_dead: fighter.is_dead(),
            transforms_used: fighter.transform_count(),
            final_position: (fighter.position.x, fighter.position.y),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchMetadata {
    pub winner: Option<Winner>,
    pub reason: Option<RoundEndReason>,
    pub ticks: Tick,
    pub left: FighterMetadata,
    pub right: FighterMetadata,
}

#[derive(Serialize)]
struct SavedLog<'a> {
    metadata: &'a MatchMetadata,
    entries: &'a [CombatLogEntry],
}

impl CombatLog {
    /// Clear the log for a new match
    pub fn clear(&mut self) {
        self.entries.clear();
        self.match_tick = 0;
    }

    /// Add a plain entry at the current tick
    pub fn log(&mut self, event_type: CombatLogEventType, message: String) {
        self.entries.push(CombatLogEntry {
            tick: self.match_tick,
            event_type,
            message,
            source: None,
            target: None,
            amount: None,
        });
    }

    /// Record a match event raised on `tick`.
    ///
    /// A restart begins a new round, so earlier entries are dropped and the
    /// per-side totals only ever describe the round in progress.
    pub fn record(&mut self, tick: Tick, event: &MatchEvent) {
        if matches!(event, MatchEvent::Restarted) {
            self.clear();
        }
        self.match_tick = tick;
        let (event_type, message, source, target, amount) = match *event {
            MatchEvent::Jumped { side } => (
                CombatLogEventType::Action,
                format!("{} jumps", side.label()),
                Some(side),
                None,
                None,
            ),
            MatchEvent::AttackStarted { side } => (
                CombatLogEventType::Action,
                format!("{} attacks", side.label()),
                Some(side),
                None,
                None,
            ),
            MatchEvent::Hit {
                attacker,
                target,
                damage,
                remaining_hp,
            } => (
                CombatLogEventType::Damage,
                format!(
                    "{} hits {} for {:.0} damage ({:.0} HP left)",
                    attacker.label(),
                    target.label(),
                    damage,
                    remaining_hp
                ),
                Some(attacker),
                Some(target),
                Some(damage),
            ),
            MatchEvent::HitAbsorbed { attacker, target } => (
                CombatLogEventType::Absorbed,
                format!(
                    "{}'s attack is absorbed by {}'s transformation",
                    attacker.label(),
                    target.label()
                ),
                Some(attacker),
                Some(target),
                None,
            ),
            MatchEvent::TransformStarted {
                side, uses_left, ..
            } => (
                CombatLogEventType::Transform,
                format!("{} transforms ({} left)", side.label(), uses_left),
                Some(side),
                None,
                None,
            ),
            MatchEvent::TransformExpired { side } => (
                CombatLogEventType::TransformExpired,
                format!("{} reverts to base form", side.label()),
                Some(side),
                None,
                None,
            ),
            MatchEvent::Died { side } => (
                CombatLogEventType::Death,
                format!("{} has been defeated", side.label()),
                None,
                Some(side),
                None,
            ),
            MatchEvent::RoundOver { winner, reason } => (
                CombatLogEventType::MatchEvent,
                format!("Round over ({:?}): {}", reason, outcome_label(winner)),
                winner.side(),
                None,
                None,
            ),
            MatchEvent::Restarted => (
                CombatLogEventType::MatchEvent,
                "Round restarted".to_string(),
                None,
                None,
                None,
            ),
        };

        self.entries.push(CombatLogEntry {
            tick,
            event_type,
            message,
            source,
            target,
            amount,
        });
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Get the last N entries
    pub fn recent(&self, count: usize) -> Vec<&CombatLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    /// Total damage dealt by a side
    pub fn damage_dealt_by(&self, side: Side) -> f32 {
        self.entries
            .iter()
            .filter(|e| e.event_type == CombatLogEventType::Damage && e.source == Some(side))
            .filter_map(|e| e.amount)
            .sum()
    }

    /// Connecting attacks by a side, absorbed ones included
    pub fn hits_landed_by(&self, side: Side) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.event_type,
                    CombatLogEventType::Damage | CombatLogEventType::Absorbed
                ) && e.source == Some(side)
            })
            .count()
    }

    /// Transformations started by a side
    pub fn transforms_used_by(&self, side: Side) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                e.event_type == CombatLogEventType::Transform && e.source == Some(side)
            })
            .count()
    }

    /// Save the log as JSON. Returns the path written.
    pub fn save_to_file(&self, metadata: &MatchMetadata, path: &Path) -> Result<String, String> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }

        let saved = SavedLog {
            metadata,
            entries: &self.entries,
        };
        let json = serde_json::to_string_pretty(&saved)
            .map_err(|e| format!("Failed to serialize combat log: {}", e))?;
        std::fs::write(path, json)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

        info!("Saved combat log to {}", path.display());
        Ok(path.display().to_string())
    }
}

/// "Player 1 Wins" / "Player 2 Wins" / "Tie"
pub fn outcome_label(winner: Winner) -> &'static str {
    match winner {
        Winner::Left => "Player 1 Wins",
        Winner::Right => "Player 2 Wins",
        Winner::Tie => "Tie",
    }
}
