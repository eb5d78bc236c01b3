//! Keybinding system for remappable controls
//!
//! Maps keyboard keys to fighter actions and saves them with the user settings.

use bevy::app::AppExit;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::combat::fighter::Side;
use crate::combat::MatchController;
use crate::input::{FighterAction, InputTracker};

/// All possible actions that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    // Player 1
    P1Left,
    P1Right,
    P1Jump,
    P1Attack,
    P1Transform,

    // Player 2
    P2Left,
    P2Right,
    P2Jump,
    P2Attack,
    P2Transform,

    // Match
    Restart,
    Quit,
}

impl GameAction {
    /// The fighter and action this key drives, if it drives one.
    pub fn fighter_action(&self) -> Option<(Side, FighterAction)> {
        let mapped = match self {
            GameAction::P1Left => (Side::Left, FighterAction::MoveLeft),
            GameAction::P1Right => (Side::Left, FighterAction::MoveRight),
            GameAction::P1Jump => (Side::Left, FighterAction::Jump),
            GameAction::P1Attack => (Side::Left, FighterAction::Attack),
            GameAction::P1Transform => (Side::Left, FighterAction::Transform),
            GameAction::P2Left => (Side::Right, FighterAction::MoveLeft),
            GameAction::P2Right => (Side::Right, FighterAction::MoveRight),
            GameAction::P2Jump => (Side::Right, FighterAction::Jump),
            GameAction::P2Attack => (Side::Right, FighterAction::Attack),
            GameAction::P2Transform => (Side::Right, FighterAction::Transform),
            GameAction::Restart | GameAction::Quit => return None,
        };
        Some(mapped)
    }

    pub fn all() -> Vec<GameAction> {
        vec![
            GameAction::P1Left,
            GameAction::P1Right,
            GameAction::P1Jump,
            GameAction::P1Attack,
            GameAction::P1Transform,
            GameAction::P2Left,
            GameAction::P2Right,
            GameAction::P2Jump,
            GameAction::P2Attack,
            GameAction::P2Transform,
            GameAction::Restart,
            GameAction::Quit,
        ]
    }
}

/// Serializable wrapper for KeyCode (stores as string)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SerializableKeyCode(String);

impl From<KeyCode> for SerializableKeyCode {
    fn from(key: KeyCode) -> Self {
        Self(format!("{:?}", key))
    }
}

impl TryFrom<SerializableKeyCode> for KeyCode {
    type Error = String;

    fn try_from(sk: SerializableKeyCode) -> Result<Self, Self::Error> {
        let key = match sk.0.as_str() {
            "Escape" => KeyCode::Escape,
            "Enter" => KeyCode::Enter,
            "Space" => KeyCode::Space,
            "Tab" => KeyCode::Tab,
            "ShiftLeft" => KeyCode::ShiftLeft,
            "ShiftRight" => KeyCode::ShiftRight,
            "ControlLeft" => KeyCode::ControlLeft,
            "ControlRight" => KeyCode::ControlRight,
            "KeyA" => KeyCode::KeyA,
            "KeyB" => KeyCode::KeyB,
            "KeyC" => KeyCode::KeyC,
            "KeyD" => KeyCode::KeyD,
            "KeyE" => KeyCode::KeyE,
            "KeyF" => KeyCode::KeyF,
            "KeyG" => KeyCode::KeyG,
            "KeyH" => KeyCode::KeyH,
            "KeyI" => KeyCode::KeyI,
            "KeyJ" => KeyCode::KeyJ,
            "KeyK" => KeyCode::KeyK,
            "KeyL" => KeyCode::KeyL,
            "KeyM" => KeyCode::KeyM,
            "KeyN" => KeyCode::KeyN,
            "KeyO" => KeyCode::KeyO,
            "KeyP" => KeyCode::KeyP,
            "KeyQ" => KeyCode::KeyQ,
            "KeyR" => KeyCode::KeyR,
            "KeyS" => KeyCode::KeyS,
            "KeyT" => KeyCode::KeyT,
            "KeyU" => KeyCode::KeyU,
            "KeyV" => KeyCode::KeyV,
            "KeyW" => KeyCode::KeyW,
            "KeyX" => KeyCode::KeyX,
            "KeyY" => KeyCode::KeyY,
            "KeyZ" => KeyCode::KeyZ,
            "Numpad0" => KeyCode::Numpad0,
            "Numpad1" => KeyCode::Numpad1,
            "Numpad2" => KeyCode::Numpad2,
            "Numpad3" => KeyCode::Numpad3,
            "NumpadEnter" => KeyCode::NumpadEnter,
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            other => return Err(format!("Unsupported key '{}'", other)),
        };
        Ok(key)
    }
}

/// Key binding with primary and optional secondary key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyBinding {
    #[serde(with = "keycode_serde")]
    pub primary: KeyCode,
    #[serde(with = "option_keycode_serde", default)]
    pub secondary: Option<KeyCode>,
}

mod keycode_serde {
    use super::*;
    use serde::{de::Error, Deserializer, Serializer};

    pub fn serialize<S>(key: &KeyCode, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let sk: SerializableKeyCode = (*key).into();
        sk.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<KeyCode, D::Error>
    where
        D: Deserializer<'de>,
    {
        let sk = SerializableKeyCode::deserialize(deserializer)?;
        KeyCode::try_from(sk).map_err(D::Error::custom)
    }
}

mod option_keycode_serde {
    use super::*;
    use serde::{de::Error, Deserializer, Serializer};

    pub fn serialize<S>(key: &Option<KeyCode>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match key {
            Some(k) => {
                let sk: SerializableKeyCode = (*k).into();
                serializer.serialize_some(&sk)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<KeyCode>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt_sk: Option<SerializableKeyCode> = Option::deserialize(deserializer)?;
        opt_sk
            .map(|sk| KeyCode::try_from(sk).map_err(D::Error::custom))
            .transpose()
    }
}

impl KeyBinding {
    pub fn new(primary: KeyCode) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn with_secondary(primary: KeyCode, secondary: KeyCode) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    pub fn matches(&self, key: KeyCode) -> bool {
        self.primary == key || self.secondary == Some(key)
    }
}

/// Complete keybindings configuration
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Keybindings {
    bindings: HashMap<GameAction, KeyBinding>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::create_defaults()
    }
}

impl Keybindings {
    /// Create default keybindings
    pub fn create_defaults() -> Self {
        let mut bindings = HashMap::new();

        // Player 1
        bindings.insert(GameAction::P1Left, KeyBinding::new(KeyCode::KeyA));
        bindings.insert(GameAction::P1Right, KeyBinding::new(KeyCode::KeyD));
        bindings.insert(GameAction::P1Jump, KeyBinding::new(KeyCode::KeyW));
        bindings.insert(GameAction::P1Attack, KeyBinding::new(KeyCode::Space));
        bindings.insert(GameAction::P1Transform, KeyBinding::new(KeyCode::KeyF));

        // Player 2
        bindings.insert(GameAction::P2Left, KeyBinding::new(KeyCode::ArrowLeft));
        bindings.insert(GameAction::P2Right, KeyBinding::new(KeyCode::ArrowRight));
        bindings.insert(GameAction::P2Jump, KeyBinding::new(KeyCode::ArrowUp));
        bindings.insert(GameAction::P2Attack, KeyBinding::new(KeyCode::ArrowDown));
        bindings.insert(
            GameAction::P2Transform,
            KeyBinding::with_secondary(KeyCode::ShiftRight, KeyCode::NumpadEnter),
        );

        // Match
        bindings.insert(GameAction::Restart, KeyBinding::new(KeyCode::KeyR));
        bindings.insert(GameAction::Quit, KeyBinding::new(KeyCode::Escape));

        Self { bindings }
    }

    /// Get the binding for an action
    pub fn get(&self, action: GameAction) -> Option<&KeyBinding> {
        self.bindings.get(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn action_just_pressed(&self, action: GameAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        self.get(action)
            .is_some_and(|binding| keyboard.get_just_pressed().any(|key| binding.matches(*key)))
    }

    /// Check if an action was just released this frame
    pub fn action_just_released(&self, action: GameAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        self.get(action)
            .is_some_and(|binding| keyboard.get_just_released().any(|key| binding.matches(*key)))
    }

    /// Get a human-readable string for a key
    pub fn key_name(key: KeyCode) -> &'static str {
        match key {
            KeyCode::Escape => "ESC",
            KeyCode::Enter => "ENTER",
            KeyCode::Space => "SPACE",
            KeyCode::Tab => "TAB",
            KeyCode::ShiftLeft => "L-SHIFT",
            KeyCode::ShiftRight => "R-SHIFT",
            KeyCode::ControlLeft => "L-CTRL",
            KeyCode::ControlRight => "R-CTRL",
            KeyCode::KeyA => "A",
            KeyCode::KeyD => "D",
            KeyCode::KeyF => "F",
            KeyCode::KeyR => "R",
            KeyCode::KeyS => "S",
            KeyCode::KeyW => "W",
            KeyCode::NumpadEnter => "NUM ENTER",
            KeyCode::ArrowUp => "↑",
            KeyCode::ArrowDown => "↓",
            KeyCode::ArrowLeft => "←",
            KeyCode::ArrowRight => "→",
            _ => "???",
        }
    }

    /// Get display string for a binding
    pub fn binding_display(&self, action: GameAction) -> String {
        if let Some(binding) = self.get(action) {
            let primary = Self::key_name(binding.primary);
            if let Some(secondary) = binding.secondary {
                format!("{} / {}", primary, Self::key_name(secondary))
            } else {
                primary.to_string()
            }
        } else {
            "Unbound".to_string()
        }
    }
}

/// Feed key transitions into the [`InputTracker`].
///
/// Key-downs for a dead fighter are dropped; releases always go through so a
/// held direction can't stick across a restart.
pub fn gather_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    keybindings: Res<Keybindings>,
    controller: Res<MatchController>,
    mut tracker: ResMut<InputTracker>,
    mut exit: EventWriter<AppExit>,
) {
    for action in GameAction::all() {
        match action.fighter_action() {
            Some((side, fighter_action)) => {
                if keybindings.action_just_pressed(action, &keyboard)
                    && !controller.fighter(side).is_dead()
                {
                    tracker.press(side, fighter_action);
                }
                if keybindings.action_just_released(action, &keyboard) {
                    tracker.release(side, fighter_action);
                }
            }
            None if keybindings.action_just_pressed(action, &keyboard) => match action {
                GameAction::Restart => tracker.press_restart(),
                GameAction::Quit => {
                    info!("Quit requested");
                    exit.send(AppExit::Success);
                }
                _ => {}
            },
            None => {}
        }
    }
}
