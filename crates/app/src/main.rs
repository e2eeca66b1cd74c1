use std::path::Path;

use bevy::prelude::*;
use bevy::window::PresentMode;

mod launch;

use launch::{report_settings_source, resolve_settings, SETTINGS_FILE};

/// Usage: `weatherfx ["snow init 2000" "snow fog" ...]`
///
/// Each argument is one console line, run after the settings file's own
/// startup commands.
fn main() {
    let (settings, source) = resolve_settings(Path::new(SETTINGS_FILE), std::env::args().skip(1));

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "WeatherFX".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.55, 0.60, 0.68)))
    // Inserted before the plugin so its defaults do not replace them.
    .insert_resource(settings)
    .insert_resource(source)
    .add_plugins((
        simulation::WorldEffectsPlugin,
        rendering::WorldEffectsRenderPlugin,
    ))
    .add_systems(Startup, report_settings_source);

    app.run();
}
