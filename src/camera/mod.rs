//! Camera module
//!
//! The [`CameraRig`] resource holds the viewpoint; input systems feed it and
//! a final system writes its view parameters into the main camera transform.

use bevy::prelude::*;

use crate::orbital::{SolarSystem, advance_bodies};

pub mod input;
pub mod rig;

pub use rig::CameraRig;

/// Marker for the camera driven by the rig
#[derive(Component)]
pub struct MainCamera;

/// Plugin for camera input, tracking and view updates.
///
/// Expects a [`CameraRig`] resource to be inserted by the caller.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                (
                    input::mouse_camera_input,
                    input::keyboard_camera_input,
                    input::app_control_input,
                ),
                tick_camera_rig.after(advance_bodies),
                apply_view_to_camera,
            )
                .chain(),
        );
    }
}

/// Smooth tracking toward the selected body's position for this frame
fn tick_camera_rig(time: Res<Time>, system: Res<SolarSystem>, mut rig: ResMut<CameraRig>) {
    rig.tick(time.delta_secs(), &system);
}

fn apply_view_to_camera(
    rig: Res<CameraRig>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    let view = rig.view_parameters();
    *transform = Transform::from_translation(view.eye).looking_at(view.target, view.up);
}
