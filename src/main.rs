// Hide console window on Windows for release builds (GUI app).
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

mod viewer;

use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;

use dicetray::tray::{RapierWorld, RecordingScene, SimulationSession, TraySettings, Viewport};

use viewer::{
    apply_scene_commands, handle_keys, handle_resize, setup, step_tray, update_status_text,
    DieEntities, TrayState,
};

/// Dice Tray - physics-driven polyhedral dice
#[derive(Parser)]
#[command(name = "dicetray")]
#[command(author, version, about = "Dice Tray - throw 3D dice onto a table")]
struct Cli {
    /// Tray settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Seed for reproducible throws
    #[arg(long)]
    seed: Option<u64>,
}

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;

fn main() {
    let cli = Cli::parse();

    let mut settings = cli
        .settings
        .as_deref()
        .map(TraySettings::load_or_default)
        .unwrap_or_default();
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    let viewport = Viewport::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32).unwrap_or_default();
    let physics = RapierWorld::new(&settings.physics);
    let session = SimulationSession::new(physics, RecordingScene::new(), settings, viewport);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Dice Tray".to_string(),
                        resolution: (WINDOW_WIDTH, WINDOW_HEIGHT).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "info,wgpu=error".to_string(),
                    ..default()
                }),
        )
        .insert_non_send_resource(TrayState(session))
        .insert_resource(DieEntities::default())
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                handle_keys,
                handle_resize,
                step_tray,
                apply_scene_commands,
                update_status_text,
            )
                .chain(),
        )
        .run();
}
