//! Data-Driven Duel Configuration
//!
//! World constants and fighter movesets are loaded from `assets/config/duel.ron`
//! instead of being hardcoded, so balance changes don't require recompilation.
//!
//! Every fighter is validated here before it can be constructed: a moveset
//! missing an animation, or an active hit frame outside the attack clip, is a
//! [`ConfigError`] at load time rather than a surprise mid-round.
//!
//! ## Usage
//! ```ignore
//! let config = load_duel_config(Path::new(DEFAULT_CONFIG_PATH))?;
//! let controller = MatchController::new(config)?;
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::combat::animation::{AnimationClip, AnimationMode, AnimationTable};

/// Default location of the duel config, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/duel.ron";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
    #[error("fighter '{fighter}' has no {mode:?} animation")]
    MissingAnimation { fighter: String, mode: AnimationMode },
    #[error("fighter '{fighter}' {mode:?} animation is invalid: {reason}")]
    InvalidAnimation {
        fighter: String,
        mode: AnimationMode,
        reason: String,
    },
    #[error("fighter '{fighter}' active frame {frame} is outside its {frames_max}-frame attack")]
    InvalidActiveFrame {
        fighter: String,
        frame: u32,
        frames_max: u32,
    },
    #[error("fighter '{fighter}' is invalid: {reason}")]
    InvalidFighter { fighter: String, reason: String },
    #[error("invalid world config: {0}")]
    InvalidWorld(String),
}

/// Arena and rule constants shared by both fighters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Arena width in pixels
    pub width: f32,
    /// Arena height in pixels
    pub height: f32,
    /// Downward acceleration added to vertical velocity each airborne tick
    pub gravity: f32,
    /// Distance from the bottom edge of the arena to the floor
    pub ground_margin: f32,
    /// Horizontal positions are clamped to `0..=width - combatant_margin`
    pub combatant_margin: f32,
    /// Horizontal speed while running, pixels per tick
    pub move_speed: f32,
    /// Vertical velocity applied by a jump (negative is up)
    pub jump_velocity: f32,
    /// Jumps available before touching the ground again
    pub max_jumps: u32,
    /// Simulation ticks per second
    pub tick_rate_hz: u32,
    /// Round length in ticks
    pub round_duration_ticks: u64,
    /// Ticks each animation frame stays on screen
    pub frame_hold_ticks: u32,
    /// Hit points every fighter starts with
    pub max_hp: f32,

    // === Transformation ===
    /// Scale while transformed
    pub transform_scale: f32,
    /// Damage dealt while transformed
    pub transform_damage: f32,
    /// Buff length in ticks
    pub transform_duration_ticks: u64,
    /// Transformations allowed per round
    pub max_transforms: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 576.0,
            gravity: 0.7,
            ground_margin: 40.0,
            combatant_margin: 74.0,
            move_speed: 5.0,
            jump_velocity: -30.0,
            max_jumps: 2,
            tick_rate_hz: 60,
            round_duration_ticks: 3600,
            frame_hold_ticks: 5,
            max_hp: 100.0,
            transform_scale: 3.0,
            transform_damage: 10.0,
            transform_duration_ticks: 300,
            max_transforms: 2,
        }
    }
}

impl WorldConfig {
    /// Y coordinate of the floor.
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_margin
    }

    /// Largest allowed x for a fighter's top-left corner.
    pub fn max_x(&self) -> f32 {
        self.width - self.combatant_margin
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::InvalidWorld(
                "width and height must be positive".to_string(),
            ));
        }
        if self.combatant_margin < 0.0 || self.combatant_margin >= self.width {
            return Err(ConfigError::InvalidWorld(format!(
                "combatant_margin {} must be within 0..width",
                self.combatant_margin
            )));
        }
        if self.ground_margin < 0.0 || self.ground_margin >= self.height {
            return Err(ConfigError::InvalidWorld(format!(
                "ground_margin {} must be within 0..height",
                self.ground_margin
            )));
        }
        if self.tick_rate_hz == 0 || self.frame_hold_ticks == 0 {
            return Err(ConfigError::InvalidWorld(
                "tick_rate_hz and frame_hold_ticks must be non-zero".to_string(),
            ));
        }
        if self.round_duration_ticks == 0 {
            return Err(ConfigError::InvalidWorld(
                "round_duration_ticks must be non-zero".to_string(),
            ));
        }
        if self.max_hp <= 0.0 {
            return Err(ConfigError::InvalidWorld("max_hp must be positive".to_string()));
        }
        if self.transform_scale <= 0.0 {
            return Err(ConfigError::InvalidWorld(
                "transform_scale must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reach of a fighter's attack, relative to its position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackBoxConfig {
    pub offset: (f32, f32),
    pub width: f32,
    pub height: f32,
}

/// Sprite-sheet metadata per mode. Every entry is required; `None` fails validation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationSet {
    #[serde(default)]
    pub idle: Option<AnimationClip>,
    #[serde(default)]
    pub run: Option<AnimationClip>,
    #[serde(default)]
    pub jump: Option<AnimationClip>,
    #[serde(default)]
    pub fall: Option<AnimationClip>,
    #[serde(default)]
    pub attack: Option<AnimationClip>,
    #[serde(default)]
    pub take_hit: Option<AnimationClip>,
    #[serde(default)]
    pub death: Option<AnimationClip>,
}

impl AnimationSet {
    pub fn get(&self, mode: AnimationMode) -> Option<&AnimationClip> {
        match mode {
            AnimationMode::Idle => self.idle.as_ref(),
            AnimationMode::Run => self.run.as_ref(),
            AnimationMode::Jump => self.jump.as_ref(),
            AnimationMode::Fall => self.fall.as_ref(),
            AnimationMode::Attack => self.attack.as_ref(),
            AnimationMode::TakeHit => self.take_hit.as_ref(),
            AnimationMode::Death => self.death.as_ref(),
        }
    }

    /// Uniform-width set built from per-mode frame counts, in `AnimationMode::all()` order.
    fn uniform(frame_width: f32, frames: [u32; AnimationMode::COUNT]) -> Self {
        let clip = |frames_max| Some(AnimationClip { frames_max, frame_width });
        Self {
            idle: clip(frames[0]),
            run: clip(frames[1]),
            jump: clip(frames[2]),
            fall: clip(frames[3]),
            attack: clip(frames[4]),
            take_hit: clip(frames[5]),
            death: clip(frames[6]),
        }
    }
}

/// One fighter's moveset and starting state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FighterConfig {
    /// Display name
    pub name: String,
    /// Spawn position (top-left of the body box)
    pub start_position: (f32, f32),
    /// Scale when not transformed
    pub base_scale: f32,
    /// Damage dealt per connecting attack when not transformed
    pub damage: f32,
    /// Sprite draw offset at base scale
    pub draw_offset: (f32, f32),
    /// Body height at base scale
    pub sprite_height: f32,
    pub attack_box: AttackBoxConfig,
    /// Attack frame on which a hit registers
    pub active_frame: u32,
    pub animations: AnimationSet,
}

impl FighterConfig {
    /// Build the validated per-mode table, failing on the first missing or malformed clip.
    pub fn animation_table(&self) -> Result<AnimationTable, ConfigError> {
        let mut clips = [AnimationClip {
            frames_max: 1,
            frame_width: 0.0,
        }; AnimationMode::COUNT];

        for mode in AnimationMode::all() {
            let clip = self
                .animations
                .get(mode)
                .ok_or_else(|| ConfigError::MissingAnimation {
                    fighter: self.name.clone(),
                    mode,
                })?;
            if clip.frames_max == 0 {
                return Err(ConfigError::InvalidAnimation {
                    fighter: self.name.clone(),
                    mode,
                    reason: "frames_max must be at least 1".to_string(),
                });
            }
            if clip.frame_width <= 0.0 {
                return Err(ConfigError::InvalidAnimation {
                    fighter: self.name.clone(),
                    mode,
                    reason: "frame_width must be positive".to_string(),
                });
            }
            clips[mode.index()] = *clip;
        }

        Ok(AnimationTable::new(clips))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let table = self.animation_table()?;

        let attack_frames = table.clip(AnimationMode::Attack).frames_max;
        if self.active_frame >= attack_frames {
            return Err(ConfigError::InvalidActiveFrame {
                fighter: self.name.clone(),
                frame: self.active_frame,
                frames_max: attack_frames,
            });
        }
        if self.base_scale <= 0.0 {
            return Err(ConfigError::InvalidFighter {
                fighter: self.name.clone(),
                reason: "base_scale must be positive".to_string(),
            });
        }
        if self.sprite_height <= 0.0 {
            return Err(ConfigError::InvalidFighter {
                fighter: self.name.clone(),
                reason: "sprite_height must be positive".to_string(),
            });
        }
        if self.attack_box.width < 0.0 || self.attack_box.height < 0.0 {
            return Err(ConfigError::InvalidFighter {
                fighter: self.name.clone(),
                reason: "attack box dimensions must be non-negative".to_string(),
            });
        }
        Ok(())
    }

    pub fn start_position(&self) -> Vec2 {
        Vec2::new(self.start_position.0, self.start_position.1)
    }

    /// Samurai Mack: the left-side moveset.
    pub fn samurai_mack() -> Self {
        Self {
            name: "Samurai Mack".to_string(),
            start_position: (0.0, 0.0),
            base_scale: 2.5,
            damage: 20.0,
            draw_offset: (215.0, 157.0),
            sprite_height: 200.0,
            attack_box: AttackBoxConfig {
                offset: (100.0, 50.0),
                width: 160.0,
                height: 50.0,
            },
            active_frame: 4,
            animations: AnimationSet::uniform(200.0, [8, 8, 2, 2, 6, 4, 6]),
        }
    }

    /// Kenji: the right-side moveset.
    pub fn kenji() -> Self {
        Self {
            name: "Kenji".to_string(),
            start_position: (400.0, 100.0),
            base_scale: 2.5,
            damage: 20.0,
            draw_offset: (215.0, 167.0),
            sprite_height: 200.0,
            attack_box: AttackBoxConfig {
                offset: (-170.0, 50.0),
                width: 170.0,
                height: 50.0,
            },
            active_frame: 2,
            animations: AnimationSet::uniform(200.0, [4, 8, 2, 2, 4, 3, 7]),
        }
    }
}

/// Root structure of the duel.ron file.
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DuelConfig {
    pub world: WorldConfig,
    pub left: FighterConfig,
    pub right: FighterConfig,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            left: FighterConfig::samurai_mack(),
            right: FighterConfig::kenji(),
        }
    }
}

impl DuelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        self.left.validate()?;
        self.right.validate()?;
        Ok(())
    }

    /// Parse and validate RON text. `origin` is only used in error messages.
    pub fn from_ron_str(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: DuelConfig = ron::from_str(contents).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Load and validate a duel config from disk.
pub fn load_duel_config(path: &Path) -> Result<DuelConfig, ConfigError> {
    let path_display = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path_display.clone(),
        source,
    })?;

    let config = DuelConfig::from_ron_str(&contents, &path_display)?;
    info!(
        "Loaded duel config from {}: {} vs {}",
        path_display, config.left.name, config.right.name
    );
    Ok(config)
}

/// Load the config at `path`, falling back to the built-in movesets if the file is absent.
///
/// A file that exists but fails validation is still an error.
pub fn load_or_default(path: &Path) -> Result<DuelConfig, ConfigError> {
    if path.exists() {
        load_duel_config(path)
    } else {
        warn!("No duel config at {}, using built-in movesets", path.display());
        Ok(DuelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        DuelConfig::default().validate().expect("defaults must validate");
    }

    #[test]
    fn test_world_derived_values() {
        let world = WorldConfig::default();
        assert_eq!(world.ground_y(), 536.0);
        assert_eq!(world.max_x(), 950.0);
    }

    #[test]
    fn test_missing_animation_is_rejected() {
        let mut fighter = FighterConfig::kenji();
        fighter.animations.death = None;
        match fighter.validate() {
            Err(ConfigError::MissingAnimation { mode, .. }) => {
                assert_eq!(mode, AnimationMode::Death)
            }
            other => panic!("expected MissingAnimation, got {:?}", other),
        }
    }

    #[test]
    fn test_active_frame_outside_attack_is_rejected() {
        let mut fighter = FighterConfig::samurai_mack();
        fighter.active_frame = 6;
        assert!(matches!(
            fighter.validate(),
            Err(ConfigError::InvalidActiveFrame { frame: 6, frames_max: 6, .. })
        ));
    }

    #[test]
    fn test_zero_frame_clip_is_rejected() {
        let mut fighter = FighterConfig::samurai_mack();
        fighter.animations.run = Some(AnimationClip {
            frames_max: 0,
            frame_width: 200.0,
        });
        assert!(matches!(
            fighter.validate(),
            Err(ConfigError::InvalidAnimation { mode: AnimationMode::Run, .. })
        ));
    }

    #[test]
    fn test_ron_round_trip_of_defaults() {
        let text = ron::ser::to_string_pretty(&DuelConfig::default(), ron::ser::PrettyConfig::default())
            .expect("serialize");
        let parsed = DuelConfig::from_ron_str(&text, "inline").expect("parse");
        assert_eq!(parsed, DuelConfig::default());
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
        let config = load_duel_config(&path).expect("shipped config loads");
        assert_eq!(config, DuelConfig::default());
    }

    #[test]
    fn test_bad_ron_reports_parse_error() {
        let err = DuelConfig::from_ron_str("(world: 3)", "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
