//! JSON configuration parsing for headless mode
//!
//! Parses JSON match configurations: which fighter config to load, how long to
//! run, and how the fighters are driven (a key script, seeded random input, or both).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::combat::fighter::{Side, Tick};
use crate::config::{load_duel_config, DuelConfig};
use crate::input::{FighterAction, InputTracker};

/// A key transition fed to the input tracker by a script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptAction {
    PressLeft,
    ReleaseLeft,
    PressRight,
    ReleaseRight,
    Jump,
    Attack,
    Transform,
    Restart,
}

impl ScriptAction {
    /// Feed this transition to the tracker for `side`. Restart ignores the side.
    pub fn apply(self, tracker: &mut InputTracker, side: Side) {
        match self {
            ScriptAction::PressLeft => tracker.press(side, FighterAction::MoveLeft),
            ScriptAction::ReleaseLeft => tracker.release(side, FighterAction::MoveLeft),
            ScriptAction::PressRight => tracker.press(side, FighterAction::MoveRight),
            ScriptAction::ReleaseRight => tracker.release(side, FighterAction::MoveRight),
            ScriptAction::Jump => tracker.press(side, FighterAction::Jump),
            ScriptAction::Attack => tracker.press(side, FighterAction::Attack),
            ScriptAction::Transform => tracker.press(side, FighterAction::Transform),
            ScriptAction::Restart => tracker.press_restart(),
        }
    }

    /// Key-downs are dropped for a dead fighter; releases and restart are not.
    pub fn is_key_down(self) -> bool {
        matches!(
            self,
            ScriptAction::PressLeft
                | ScriptAction::PressRight
                | ScriptAction::Jump
                | ScriptAction::Attack
                | ScriptAction::Transform
        )
    }
}

/// One scripted key transition, consumed by the tick numbered `tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedInput {
    pub tick: Tick,
    pub side: Side,
    pub action: ScriptAction,
}

/// Headless match configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessMatchConfig {
    /// RON fighter/world config (default: built-in movesets)
    #[serde(default)]
    pub duel_config: Option<PathBuf>,
    /// Stop after this many updates even if the round is still running
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
    /// Custom output path for match log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
    /// Drive both fighters with seeded random input
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Scripted key transitions, in any order
    #[serde(default)]
    pub script: Vec<ScriptedInput>,
}

fn default_max_ticks() -> u64 {
    4200
}

impl Default for HeadlessMatchConfig {
    fn default() -> Self {
        Self {
            duel_config: None,
            max_ticks: default_max_ticks(),
            output_path: None,
            random_seed: None,
            script: Vec::new(),
        }
    }
}

impl HeadlessMatchConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, String> {
        let config: HeadlessMatchConfig =
            serde_json::from_str(contents).map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_ticks == 0 {
            return Err("max_ticks must be positive".to_string());
        }

        if let Some(entry) = self.script.iter().find(|entry| entry.tick == 0) {
            return Err(format!(
                "script entry {:?} for {:?} has tick 0 (ticks start at 1)",
                entry.action, entry.side
            ));
        }

        if let Some(entry) = self.script.iter().find(|entry| entry.tick > self.max_ticks) {
            return Err(format!(
                "script entry at tick {} is past max_ticks {}",
                entry.tick, self.max_ticks
            ));
        }

        Ok(())
    }

    /// Load the fighter/world config this match runs with
    pub fn to_duel_config(&self) -> Result<DuelConfig, String> {
        match &self.duel_config {
            Some(path) => load_duel_config(path).map_err(|e| e.to_string()),
            None => Ok(DuelConfig::default()),
        }
    }

    /// Script entries ordered by tick; entries on the same tick keep file order
    pub fn sorted_script(&self) -> Vec<ScriptedInput> {
        let mut script = self.script.clone();
        script.sort_by_key(|entry| entry.tick);
        script
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json_uses_defaults() {
        let config = HeadlessMatchConfig::from_json_str("{}").unwrap();
        assert_eq!(config.max_ticks, 4200);
        assert!(config.script.is_empty());
        assert!(config.random_seed.is_none());
    }

    #[test]
    fn test_script_parses_snake_case_actions() {
        let json = r#"{
            "script": [
                { "tick": 5, "side": "Right", "action": "press_left" },
                { "tick": 2, "side": "Left", "action": "attack" }
            ]
        }"#;
        let config = HeadlessMatchConfig::from_json_str(json).unwrap();
        let script = config.sorted_script();
        assert_eq!(script[0].action, ScriptAction::Attack);
        assert_eq!(script[1].side, Side::Right);
        assert_eq!(script[1].action, ScriptAction::PressLeft);
    }

    #[test]
    fn test_rejects_tick_zero() {
        let json = r#"{ "script": [ { "tick": 0, "side": "Left", "action": "jump" } ] }"#;
        let err = HeadlessMatchConfig::from_json_str(json).unwrap_err();
        assert!(err.contains("tick 0"));
    }

    #[test]
    fn test_rejects_zero_max_ticks() {
        assert!(HeadlessMatchConfig::from_json_str(r#"{ "max_ticks": 0 }"#).is_err());
    }

    #[test]
    fn test_rejects_unknown_action() {
        let json = r#"{ "script": [ { "tick": 1, "side": "Left", "action": "uppercut" } ] }"#;
        assert!(HeadlessMatchConfig::from_json_str(json).is_err());
    }

    #[test]
    fn test_missing_duel_config_file() {
        let config = HeadlessMatchConfig {
            duel_config: Some(PathBuf::from("does/not/exist.ron")),
            ..Default::default()
        };
        assert!(config.to_duel_config().is_err());
    }
}
