//! Game settings and configuration
//!
//! Manages user preferences for the window and controls.

use bevy::prelude::*;
use bevy::window::{MonitorSelection, PresentMode, WindowMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::keybindings::Keybindings;

/// User-configurable game settings
#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
pub struct GameSettings {
    pub window_mode: WindowModeOption,
    pub window_scale: WindowScaleOption,
    pub vsync: bool,
    pub keybindings: Keybindings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            window_mode: WindowModeOption::Windowed,
            window_scale: WindowScaleOption::Native,
            vsync: true,
            keybindings: Keybindings::default(),
        }
    }
}

impl GameSettings {
    /// Get the path to the settings file
    fn settings_path() -> PathBuf {
        PathBuf::from("settings.ron")
    }

    /// Load settings from file. On first run the defaults are written out so
    /// they can be edited by hand.
    pub fn load() -> Self {
        let path = Self::settings_path();
        if !path.exists() {
            info!("No settings file found, writing defaults");
            let settings = Self::default();
            if let Err(e) = settings.save() {
                warn!("Failed to write default settings: {}", e);
            }
            return settings;
        }
        match fs::read_to_string(&path) {
            Ok(contents) => Self::from_ron_str(&contents).unwrap_or_else(|e| {
                warn!("Failed to parse settings file: {}", e);
                Self::default()
            }),
            Err(e) => {
                warn!("Failed to read settings file: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(contents)
    }

    /// Save settings to file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::settings_path();
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(&path, contents)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }

    pub fn present_mode(&self) -> PresentMode {
        if self.vsync {
            PresentMode::AutoVsync
        } else {
            PresentMode::AutoNoVsync
        }
    }
}

/// Window mode options
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowModeOption {
    Windowed,
    BorderlessFullscreen,
}

impl WindowModeOption {
    pub fn to_bevy(&self) -> WindowMode {
        match self {
            WindowModeOption::Windowed => WindowMode::Windowed,
            WindowModeOption::BorderlessFullscreen => {
                WindowMode::BorderlessFullscreen(MonitorSelection::Current)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowModeOption::Windowed => "Windowed",
            WindowModeOption::BorderlessFullscreen => "Borderless Fullscreen",
        }
    }
}

/// Window size as a multiple of the arena size. The camera always shows the whole arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowScaleOption {
    Native,
    OneAndHalf,
    Double,
}

impl WindowScaleOption {
    pub fn factor(&self) -> f32 {
        match self {
            WindowScaleOption::Native => 1.0,
            WindowScaleOption::OneAndHalf => 1.5,
            WindowScaleOption::Double => 2.0,
        }
    }

    /// Window size for an arena of `width` × `height`
    pub fn dimensions(&self, width: f32, height: f32) -> (f32, f32) {
        (width * self.factor(), height * self.factor())
    }
}

/// Plugin for managing game settings
pub struct SettingsPlugin {
    pub settings: GameSettings,
}

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        // Also insert keybindings as a separate resource for easy access
        let keybindings = self.settings.keybindings.clone();

        info!(
            "Window: {}, scale {}x, vsync {}",
            self.settings.window_mode.as_str(),
            self.settings.window_scale.factor(),
            self.settings.vsync
        );
        app.insert_resource(self.settings.clone())
            .insert_resource(keybindings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::GameAction;

    #[test]
    fn test_settings_ron_round_trip() {
        let mut settings = GameSettings::default();
        settings.vsync = false;
        settings.window_scale = WindowScaleOption::Double;
        let text = ron::ser::to_string_pretty(&settings, ron::ser::PrettyConfig::default()).unwrap();

        let parsed = GameSettings::from_ron_str(&text).unwrap();
        assert!(!parsed.vsync);
        assert_eq!(parsed.window_scale, WindowScaleOption::Double);
        assert_eq!(
            parsed.keybindings.get(GameAction::P1Attack),
            settings.keybindings.get(GameAction::P1Attack)
        );
    }

    #[test]
    fn test_window_scale_dimensions() {
        assert_eq!(WindowScaleOption::Native.dimensions(1024.0, 576.0), (1024.0, 576.0));
        assert_eq!(WindowScaleOption::Double.dimensions(1024.0, 576.0), (2048.0, 1152.0));
    }
}
