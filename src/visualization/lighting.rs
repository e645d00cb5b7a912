//! Scene lighting outside the star's own point light

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

/// Low ambient fill so night sides stay readable
pub fn setup_ambient_light(mut commands: Commands) {
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: 80.0,
        ..default()
    });
}
