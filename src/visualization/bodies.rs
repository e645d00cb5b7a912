//! Body meshes, ring bands and per-frame transform sync

use bevy::light::NotShadowCaster;
use bevy::prelude::*;

use crate::config::{DisplaySettings, RingConfig};
use crate::orbital::{BodyId, BodyKind, OrbitalBody, SolarSystem, advance_bodies};

const SPHERE_SECTORS: u32 = 48;
const SPHERE_STACKS: u32 = 24;
const STAR_EMISSIVE_STRENGTH: f32 = 8.0;
const STAR_LIGHT_INTENSITY: f32 = 40_000_000.0;
const STAR_LIGHT_RANGE: f32 = 200.0;
const STAR_LIGHT_COLOR: Color = Color::srgb(1.0, 0.9, 0.7);

/// Positioned at the body's world location; parent of its sphere and rings.
#[derive(Component)]
pub struct BodyAnchor;

/// The spinning sphere of a body
#[derive(Component)]
pub struct BodySphere(pub BodyId);

/// Plugin for body rendering.
pub struct BodiesPlugin;

impl Plugin for BodiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_bodies).add_systems(
            Update,
            (sync_body_anchors, sync_body_spin).after(advance_bodies),
        );
    }
}

fn spawn_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    system: Res<SolarSystem>,
    display: Res<DisplaySettings>,
) {
    for entry in system.bodies() {
        let body = entry.body;
        let mesh = meshes.add(
            Sphere::new(body.radius())
                .mesh()
                .uv(SPHERE_SECTORS, SPHERE_STACKS),
        );
        let texture = body.texture().map(|path| asset_server.load(path.to_string()));
        let material = materials.add(body_material(body, texture));

        let mut anchor = commands.spawn((
            Transform::from_translation(plane_to_world(entry.position)),
            Visibility::Visible,
            BodyAnchor,
            entry.id,
            Name::new(body.name().to_string()),
        ));

        anchor.with_children(|parent| {
            let mut sphere = parent.spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::IDENTITY,
                BodySphere(entry.id),
            ));

            if body.kind().is_light_source() {
                // The light sits inside the sphere
                sphere.insert(NotShadowCaster);
                parent.spawn(star_light(body.radius(), &display));
            }

            for ring in body.rings() {
                parent.spawn((
                    Mesh3d(meshes.add(Annulus::new(ring.inner_radius, ring.outer_radius))),
                    MeshMaterial3d(materials.add(ring_material(ring))),
                    Transform::from_rotation(ring_rotation(ring.tilt_degrees)),
                ));
            }
        });
    }
    info!("Spawned {} bodies", system.bodies().count());
}

fn star_light(radius: f32, display: &DisplaySettings) -> PointLight {
    PointLight {
        color: STAR_LIGHT_COLOR,
        intensity: STAR_LIGHT_INTENSITY,
        range: STAR_LIGHT_RANGE,
        radius,
        shadows_enabled: display.star_shadows,
        ..default()
    }
}

fn body_material(body: &OrbitalBody, texture: Option<Handle<Image>>) -> StandardMaterial {
    let [r, g, b] = body.color();
    let base_color = Color::srgb(r, g, b);

    match body.kind() {
        BodyKind::Star => StandardMaterial {
            base_color,
            base_color_texture: texture,
            emissive: LinearRgba::from(base_color) * STAR_EMISSIVE_STRENGTH,
            ..default()
        },
        BodyKind::Planet | BodyKind::Moon => StandardMaterial {
            base_color,
            base_color_texture: texture,
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        },
    }
}

fn ring_material(ring: &RingConfig) -> StandardMaterial {
    let [r, g, b, a] = ring.color;
    StandardMaterial {
        base_color: Color::srgba(r, g, b, a),
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        perceptual_roughness: 1.0,
        ..default()
    }
}

/// Lays the XY-plane annulus flat on XZ, then tilts it about X.
fn ring_rotation(tilt_degrees: f32) -> Quat {
    Quat::from_rotation_x(tilt_degrees.to_radians()) * Quat::from_rotation_x(-90f32.to_radians())
}

/// Orbital-plane (x, z) to a point on the world XZ plane
pub fn plane_to_world(position: Vec2) -> Vec3 {
    Vec3::new(position.x, 0.0, position.y)
}

/// Spin about +Y; stars hold still.
fn spin_rotation(body: &OrbitalBody) -> Quat {
    if body.kind() == BodyKind::Star {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_y((body.rotation_angle_normalized() as f32).to_radians())
}

fn sync_body_anchors(
    system: Res<SolarSystem>,
    mut anchors: Query<(&BodyId, &mut Transform), With<BodyAnchor>>,
) {
    if !system.is_changed() {
        return;
    }
    for (&id, mut transform) in &mut anchors {
        let Some(position) = system.world_position(id) else {
            warn!("Body {:?} has an entity but no kinematic state", id);
            continue;
        };
        transform.translation = plane_to_world(position);
    }
}

fn sync_body_spin(system: Res<SolarSystem>, mut spheres: Query<(&BodySphere, &mut Transform)>) {
    if !system.is_changed() {
        return;
    }
    for (sphere, mut transform) in &mut spheres {
        if let Some(body) = system.body(sphere.0) {
            transform.rotation = spin_rotation(body);
        }
    }
}
