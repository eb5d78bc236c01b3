//! DuelSim - Two-Player 2D Fighting Game
//!
//! Runs the windowed game by default, or a headless match with `--headless`.

use std::path::Path;
use std::process::ExitCode;

use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_egui::EguiPlugin;

use duelsim::cli::{self, Args};
use duelsim::combat::{DuelPlugin, MatchController, TickSchedule};
use duelsim::config::{self, load_duel_config, DEFAULT_CONFIG_PATH};
use duelsim::headless::{run_headless_match, HeadlessMatchConfig, MatchResult};
use duelsim::play_match::view::outcome_text;
use duelsim::play_match::PlayMatchPlugin;
use duelsim::settings::{GameSettings, SettingsPlugin};

fn main() -> ExitCode {
    let args = cli::parse_args();

    let outcome = match args.headless.as_deref() {
        Some(path) => run_headless(path, &args),
        None => run_windowed(&args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_headless(path: &Path, args: &Args) -> Result<(), String> {
    let mut config = HeadlessMatchConfig::load_from_file(path)?;
    if let Some(output) = &args.output {
        config.output_path = Some(output.display().to_string());
    }
    if let Some(max_ticks) = args.max_ticks {
        config.max_ticks = max_ticks;
    }
    if let Some(duel_config) = &args.config {
        config.duel_config = Some(duel_config.clone());
    }

    println!("Starting headless match simulation...");
    println!("  Max ticks: {}", config.max_ticks);
    println!("  Scripted inputs: {}", config.script.len());
    if let Some(seed) = config.random_seed {
        println!("  Random seed: {}", seed);
    }

    let result = run_headless_match(config)?;
    print_summary(&result);
    Ok(())
}

fn print_summary(result: &MatchResult) {
    match result.winner {
        Some(winner) => println!(
            "Match complete after {} ticks: {} ({:?})",
            result.ticks,
            outcome_text(winner),
            result.end_reason
        ),
        None => println!("Match unresolved after {} updates", result.updates),
    }
    for fighter in [&result.left, &result.right] {
        println!(
            "  {}: {:.0}/{:.0} HP, {:.0} damage dealt, {} transforms{}",
            fighter.name,
            fighter.final_health,
            fighter.max_health,
            fighter.damage_dealt,
            fighter.transforms_used,
            if fighter.is_dead { ", defeated" } else { "" }
        );
    }
    if let Some(path) = &result.log_path {
        println!("Log saved to: {}", path);
    }
}

fn run_windowed(args: &Args) -> Result<(), String> {
    let duel_config = match &args.config {
        Some(path) => load_duel_config(path),
        None => config::load_or_default(Path::new(DEFAULT_CONFIG_PATH)),
    }
    .map_err(|e| e.to_string())?;
    let controller = MatchController::new(duel_config)
        .map_err(|e| format!("Invalid duel config: {}", e))?;

    let settings = GameSettings::load();
    let world = &controller.config().world;
    let (width, height) = settings.window_scale.dimensions(world.width, world.height);

    App::new()
        // Bevy default plugins with custom window settings
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "2D Fighting Game".to_string(),
                resolution: WindowResolution::new(width, height),
                mode: settings.window_mode.to_bevy(),
                present_mode: settings.present_mode(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        // Our game plugins
        .add_plugins((
            EguiPlugin,
            SettingsPlugin { settings },
            DuelPlugin {
                controller,
                schedule: TickSchedule::Fixed,
            },
            PlayMatchPlugin,
        ))
        .run();

    Ok(())
}
