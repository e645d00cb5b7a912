use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod camera;
mod config;
mod orbital;
mod visualization;

use camera::{CameraPlugin, CameraRig, MainCamera};
use config::{DisplaySettings, OrreryConfig};
use orbital::{OrbitalPlugin, SimulationClock, SolarSystem};
use visualization::VisualizationPlugin;

// Spawn the main camera; its transform is rewritten from the rig every frame
fn setup_camera(mut commands: Commands, rig: Res<CameraRig>, display: Res<DisplaySettings>) {
    let view = rig.view_parameters();
    let mut camera = commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            near: 0.05,
            far: 2_000.0,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        Tonemapping::TonyMcMapface,
        Transform::from_translation(view.eye).looking_at(view.target, view.up),
        MainCamera,
        Name::new("Main Camera"),
    ));
    // Lets the emissive star glow
    if display.bloom {
        camera.insert(Bloom::NATURAL);
    }
}

fn main() -> anyhow::Result<()> {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Orrery".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    // After DefaultPlugins so config loading is logged
    let config = OrreryConfig::load()?;
    let system = SolarSystem::from_config(&config.system, &mut rand::rng())?;
    let clock = SimulationClock::from_settings(&config.time);
    let rig = CameraRig::new(config.camera)?;

    app.insert_resource(system)
        .insert_resource(clock)
        .insert_resource(rig)
        .insert_resource(config.display);

    app.add_plugins(OrbitalPlugin);
    app.add_plugins(CameraPlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_systems(Startup, setup_camera);

    app.run();
    Ok(())
}
