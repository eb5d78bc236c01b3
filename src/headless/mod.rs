//! Headless mode for automated testing
//!
//! This module runs duels without any graphical output. Fighters are driven
//! by a key script, by seeded random input, or both.
//!
//! ## Usage
//!
//! ```bash
//! # Run a headless match
//! cargo run --release -- --headless match_config.json
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "max_ticks": 4200,
//!   "random_seed": 42,
//!   "script": [
//!     { "tick": 1, "side": "Left", "action": "press_right" },
//!     { "tick": 30, "side": "Left", "action": "attack" }
//!   ]
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::{HeadlessMatchConfig, ScriptAction, ScriptedInput};
pub use runner::{run_headless_match, FighterResult, MatchResult};
