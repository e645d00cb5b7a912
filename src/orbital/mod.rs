//! Orbital kinematics module
//!
//! This module holds the body tree, its per-frame angle updates and the
//! simulation clock that scales them.

use bevy::prelude::*;

pub mod body;
pub mod system;
pub mod time;

pub use body::{BodyKind, OrbitalBody};
pub use system::{BodyId, SolarSystem, TrackTarget};
pub use time::{SimulationClock, advance_bodies};

/// Plugin for body kinematics and time management.
///
/// Expects a [`SolarSystem`] resource to be inserted by the caller.
pub struct OrbitalPlugin;

impl Plugin for OrbitalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationClock>()
            .add_systems(Update, advance_bodies);
    }
}
