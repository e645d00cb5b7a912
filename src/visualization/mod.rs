//! Visualization module
//!
//! Turns the kinematic model into entities: one anchor per body with its
//! sphere and rings, orbit paths as gizmos, ambient lighting and an optional
//! skybox.

use bevy::prelude::*;

pub mod bodies;
pub mod lighting;
pub mod orbits;
pub mod skybox;

pub use bodies::BodiesPlugin;
pub use orbits::OrbitDisplay;

/// Plugin for visualization systems
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(BodiesPlugin)
            .init_resource::<OrbitDisplay>()
            .add_systems(
                Startup,
                (lighting::setup_ambient_light, skybox::load_skybox),
            )
            .add_systems(
                Update,
                (
                    (orbits::toggle_orbits, orbits::draw_orbits).chain(),
                    skybox::attach_skybox,
                ),
            );
    }
}
