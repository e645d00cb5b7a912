//! Orbit path gizmos

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::orbital::SolarSystem;
use crate::visualization::bodies::plane_to_world;

const ORBIT_COLOR: Color = Color::srgb(0.5, 0.5, 0.5);
const ORBIT_RESOLUTION: u32 = 128;

/// Whether orbit paths are drawn
#[derive(Resource, Debug, Clone)]
pub struct OrbitDisplay {
    pub enabled: bool,
}

impl Default for OrbitDisplay {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Circle of each body's orbit around its parent's current position
pub fn draw_orbits(mut gizmos: Gizmos, display: Res<OrbitDisplay>, system: Res<SolarSystem>) {
    if !display.enabled {
        return;
    }
    for entry in system.bodies() {
        if entry.body.distance() <= 0.0 {
            continue;
        }
        let Some(center) = system.parent_position(entry.id) else {
            continue;
        };
        gizmos
            .circle(orbit_isometry(center), entry.body.distance(), ORBIT_COLOR)
            .resolution(ORBIT_RESOLUTION);
    }
}

/// Gizmo circles lie in XY; turn them onto the orbital plane.
fn orbit_isometry(center: Vec2) -> Isometry3d {
    Isometry3d::new(plane_to_world(center), Quat::from_rotation_x(FRAC_PI_2))
}

/// O toggles orbit paths.
pub fn toggle_orbits(keys: Res<ButtonInput<KeyCode>>, mut display: ResMut<OrbitDisplay>) {
    if keys.just_pressed(KeyCode::KeyO) {
        display.enabled = !display.enabled;
        let state = if display.enabled { "on" } else { "off" };
        info!("Orbit paths {}", state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_orbit_circle_lies_on_plane() {
        let iso = orbit_isometry(Vec2::new(2.0, 3.0));
        let point = iso.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(point.y, 0.0, epsilon = 1e-6);

        let point = iso.transform_point(Vec3::new(0.0, 1.0, 0.0));
        assert_abs_diff_eq!(point.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(point.x, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!((point.z - 3.0).abs(), 1.0, epsilon = 1e-6);
    }
}
