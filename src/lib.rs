//! DuelSim - Two-Player 2D Fighting Game
//!
//! Two fighters share one keyboard and duel on a flat stage until one is
//! knocked out or the clock runs out.
//!
//! This library exposes the core game modules for testing and reuse.

pub mod camera;
pub mod cli;
pub mod combat;
pub mod config;
pub mod headless;
pub mod input;
pub mod keybindings;
pub mod play_match;
pub mod settings;
pub mod ui;

// Re-export commonly used types
pub use combat::log::{CombatLog, CombatLogEventType};
pub use combat::{DuelPlugin, Fighter, MatchController, MatchEvent, Side, TickSchedule, Winner};
pub use config::{ConfigError, DuelConfig};
pub use headless::{HeadlessMatchConfig, MatchResult};
pub use input::{InputTracker, TickInput};
