use std::path::PathBuf;

use anyhow::{Context, Result};
use bevy::prelude::*;
use bevy::math::bounding::Aabb2d;
use bevy::log::LogPlugin;
use bevy::window::{WindowPlugin, PrimaryWindow};
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy_egui::EguiPlugin;
use bevy_rts_camera::*;
use clap::Parser;

pub mod config;
pub mod systems;


// import modules here
use systems::city::{CityConfig, CityGenerationPlugin, fresh_seed};

use crate::systems::ui::UIPlugin;

const LOG_FILTER: &str = "wgpu=error,naga=warn";

#[derive(Parser)]
#[command(author, version, about = "Procedural city maker", long_about = None)]
struct Args {
    /// JSON file with the initial city parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the first city, random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log at debug level
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let city_config = match &args.config {
        Some(path) => CityConfig::from_json_file(path)
            .with_context(|| format!("could not load city parameters from {}", path.display()))?,
        None => CityConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(fresh_seed);

    let level = if args.verbose { bevy::log::Level::DEBUG } else { bevy::log::Level::INFO };

    let exit = App::new()
        .add_plugins(DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "City Maker".to_string(),
                    mode: bevy::window::WindowMode::Windowed,
                    resolution: bevy::window::WindowResolution::new(1920.0, 1080.0),
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                level,
                filter: LOG_FILTER.to_string(),
                ..default()
            }))
        .add_plugins(EguiPlugin::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(RtsCameraPlugin)

        // my custom plugins
        .add_plugins(CityGenerationPlugin { config: city_config, seed })
        .add_plugins(UIPlugin)

        .insert_resource(ClearColor(Color::BLACK)) // world color
        .add_systems(Startup, (start, maximize_window))
        .add_systems(Update, handle_exit)
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("city maker exited with code {code}"),
    }
}

fn maximize_window(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    for mut window in windows.iter_mut() {
        window.set_maximized(true);
    }
}

// application entry point here
fn start(
    mut commands: Commands,
    city_config: Res<CityConfig>,
) {
    let center = Vec2::new(city_config.width_x as f32, city_config.depth_z as f32) / 2.0;
    let reach = config::FOOTPRINT_MAX as f32;

    // spawn camera, bounded around the footprint
    commands.spawn((
        RtsCamera {
            bounds: Aabb2d::new(center, Vec2::splat(reach)),
            min_angle: 0.66,
            height_max: 220.0,
            ..default()
        },
        RtsCameraControls {
            key_up: KeyCode::KeyW,
            key_down: KeyCode::KeyS,
            key_left: KeyCode::KeyA,
            key_right: KeyCode::KeyD,
            key_rotate_left: KeyCode::F24,  // should figure out how to unassign a key :)
            key_rotate_right: KeyCode::F23,
            pan_speed: 40.0,
            zoom_sensitivity: 0.15,
            edge_pan_width: 0.0,
            ..default()
        },
    ));

    // spawn light source
    commands.spawn((
        DirectionalLight {
            illuminance: 1_700.,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(50000.0, 50000.0, 50000.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

// application exit
fn handle_exit(
    keys: Res<ButtonInput<KeyCode>>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
