//! HUD Rendering Systems
//!
//! Health bars, the round timer, the outcome banner and a short combat feed.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::view::{outcome_text, timer_text, FighterView};
use crate::combat::fighter::Side;
use crate::combat::log::CombatLog;
use crate::combat::MatchController;
use crate::keybindings::{GameAction, Keybindings};
use crate::ui::{colors, fonts};

/// HP fraction below which the bar turns red
const LOW_HP_THRESHOLD: f32 = 0.3;
const HEALTH_BAR_WIDTH: f32 = 380.0;
const HEALTH_BAR_HEIGHT: f32 = 24.0;
/// Combat feed lines shown at the bottom of the screen
const FEED_LINES: usize = 4;

/// Text for the restart hint, using the current binding
pub fn restart_hint(keybindings: &Keybindings) -> String {
    format!(
        "Press {} to restart",
        keybindings.binding_display(GameAction::Restart)
    )
}

fn health_bar(ui: &mut egui::Ui, view: &FighterView, fill_from_right: bool) {
    let fraction = view.health_fraction();
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT),
        egui::Sense::hover(),
    );
    let painter = ui.painter();
    painter.rect_filled(rect, 2.0, colors::HEALTH_EMPTY);

    let filled_width = rect.width() * fraction;
    let filled = if fill_from_right {
        egui::Rect::from_min_max(egui::pos2(rect.max.x - filled_width, rect.min.y), rect.max)
    } else {
        egui::Rect::from_min_max(rect.min, egui::pos2(rect.min.x + filled_width, rect.max.y))
    };
    let color = if fraction < LOW_HP_THRESHOLD {
        colors::HEALTH_LOW
    } else {
        colors::HEALTH
    };
    painter.rect_filled(filled, 2.0, color);
    painter.rect_stroke(rect, 2.0, egui::Stroke::new(2.0, egui::Color32::WHITE));
}

/// Render health bars, timer, and the outcome once the round is over.
pub fn render_hud(
    mut contexts: EguiContexts,
    controller: Res<MatchController>,
    keybindings: Res<Keybindings>,
) {
    // Use try_ctx_mut to gracefully handle window close
    let Some(ctx) = contexts.try_ctx_mut() else { return; };

    let left = FighterView::from(controller.fighter(Side::Left));
    let right = FighterView::from(controller.fighter(Side::Right));
    let tick_rate = controller.config().world.tick_rate_hz;

    egui::Area::new(egui::Id::new("duel_hud_top"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 12.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    health_bar(ui, &left, true);
                    ui.label(
                        egui::RichText::new(&left.name)
                            .size(fonts::BODY)
                            .color(colors::TEXT),
                    );
                });

                egui::Frame::none()
                    .fill(egui::Color32::from_black_alpha(200))
                    .inner_margin(egui::Margin::symmetric(14.0, 4.0))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(timer_text(controller.remaining_ticks(), tick_rate))
                                .size(fonts::HEADER)
                                .color(colors::TEXT)
                                .strong(),
                        );
                    });

                ui.vertical(|ui| {
                    health_bar(ui, &right, false);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                        ui.label(
                            egui::RichText::new(&right.name)
                                .size(fonts::BODY)
                                .color(colors::TEXT),
                        );
                    });
                });
            });
        });

    if let Some(winner) = controller.winner() {
        egui::Area::new(egui::Id::new("duel_hud_outcome"))
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, -40.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(outcome_text(winner))
                            .size(fonts::TITLE)
                            .color(egui::Color32::WHITE)
                            .strong(),
                    );
                    ui.label(
                        egui::RichText::new(restart_hint(&keybindings))
                            .size(fonts::BODY)
                            .color(colors::TEXT_DIM),
                    );
                });
            });
    }
}

/// Last few combat log lines along the bottom edge
pub fn render_combat_feed(mut contexts: EguiContexts, combat_log: Res<CombatLog>) {
    let Some(ctx) = contexts.try_ctx_mut() else { return; };

    egui::Area::new(egui::Id::new("duel_hud_feed"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            for entry in combat_log.recent(FEED_LINES) {
                ui.label(
                    egui::RichText::new(format!("[{}] {}", entry.tick, entry.message))
                        .size(fonts::COMBAT_LOG)
                        .color(colors::TEXT_DIM),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restart_hint_uses_binding() {
        let bindings = Keybindings::default();
        assert_eq!(restart_hint(&bindings), "Press R to restart");
    }
}
