//! Shared UI constants
//!
//! Colors and font sizes used by the arena quads and the egui HUD.

/// Common colors used throughout the UI
pub mod colors {
    use bevy::prelude::*;
    use bevy_egui::egui::Color32;

    /// Player 1 color (blue-ish)
    pub const PLAYER_1: Color = Color::srgb(0.2, 0.4, 0.8);
    /// Player 2 color (red-ish)
    pub const PLAYER_2: Color = Color::srgb(0.8, 0.2, 0.2);
    /// Flash while a hit lands
    pub const HIT_FLASH: Color = Color::srgb(1.0, 0.95, 0.9);
    /// Transformed fighter tint
    pub const TRANSFORMED: Color = Color::srgb(0.95, 0.75, 0.2);
    /// Dead fighter
    pub const DEFEATED: Color = Color::srgb(0.35, 0.35, 0.35);
    /// Attack box while the strike is live
    pub const ATTACK_BOX: Color = Color::srgba(1.0, 0.9, 0.2, 0.35);
    /// Sprite frame outline
    pub const FRAME: Color = Color::srgba(1.0, 1.0, 1.0, 0.06);
    /// Arena floor
    pub const FLOOR: Color = Color::srgb(0.18, 0.16, 0.14);
    /// Arena background
    pub const BACKGROUND: Color = Color::srgb(0.07, 0.08, 0.12);

    /// Health bar color
    pub const HEALTH: Color32 = Color32::from_rgb(51, 204, 51);
    /// Health bar low color
    pub const HEALTH_LOW: Color32 = Color32::from_rgb(204, 51, 51);
    /// Health bar background
    pub const HEALTH_EMPTY: Color32 = Color32::from_rgb(40, 40, 50);
    /// HUD text
    pub const TEXT: Color32 = Color32::from_rgb(230, 230, 230);
    /// Dimmed HUD text
    pub const TEXT_DIM: Color32 = Color32::from_rgb(160, 160, 170);
}

/// Font sizes used throughout the UI
pub mod fonts {
    /// Round outcome banner
    pub const TITLE: f32 = 48.0;
    /// Countdown timer
    pub const HEADER: f32 = 32.0;
    /// Names and hints
    pub const BODY: f32 = 18.0;
    /// Combat log text
    pub const COMBAT_LOG: f32 = 12.0;
}
