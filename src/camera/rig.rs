//! Camera rig: manual orbit/pan/zoom and smoothed body tracking
//!
//! The rig orbits a look-at point on the orbital plane. `yaw` is the compass
//! angle (degrees) of the eye around that point, `height` its elevation and
//! `distance` its horizontal reach.

use bevy::prelude::*;

use crate::config::{CameraSettings, ConfigError};
use crate::orbital::time::REFERENCE_FRAME_RATE;
use crate::orbital::{BodyId, BodyKind, SolarSystem, TrackTarget};

const PRESET_DISTANCE: f32 = 30.0;
const STAR_YAW_DEG: f32 = 45.0;
const STAR_DISTANCE_SCALE: f32 = 1.5;
const STAR_PULLBACK_SCALE: f32 = 0.8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CameraMode {
    Manual,
    Tracking(BodyId),
}

/// What a mouse drag does
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

/// Predefined viewpoints around the origin
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ViewPreset {
    Top,
    Bottom,
    Left,
    Right,
    Front,
    Back,
}

impl ViewPreset {
    /// (yaw degrees, height)
    fn pose(self) -> (f32, f32) {
        match self {
            ViewPreset::Top => (0.0, 50.0),
            ViewPreset::Bottom => (0.0, -50.0),
            ViewPreset::Left => (90.0, 5.0),
            ViewPreset::Right => (270.0, 5.0),
            ViewPreset::Front => (0.0, 5.0),
            ViewPreset::Back => (180.0, 5.0),
        }
    }
}

/// Eye, look-at target and up vector handed to the view transform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewParameters {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// Pose the rig converges to for a body
#[derive(Copy, Clone, Debug)]
struct Framing {
    pan: Vec2,
    yaw: f32,
    height: f32,
    distance: f32,
}

#[derive(Resource, Debug, Clone)]
pub struct CameraRig {
    settings: CameraSettings,
    distance: f32,
    yaw: f32,
    height: f32,
    pan: Vec2,
    mode: CameraMode,
}

impl CameraRig {
    pub fn new(settings: CameraSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            distance: settings.initial_distance.max(settings.min_distance),
            yaw: settings.initial_yaw,
            height: settings.initial_height,
            pan: Vec2::ZERO,
            mode: CameraMode::Manual,
            settings,
        })
    }

    /// Apply a drag of `delta` pixels (x right, y down). Cancels tracking.
    pub fn apply_manual_delta(&mut self, drag: DragMode, delta: Vec2) {
        self.mode = CameraMode::Manual;
        match drag {
            DragMode::Rotate => {
                self.yaw += delta.x * self.settings.yaw_sensitivity;
                self.height -= delta.y * self.settings.height_sensitivity;
            }
            DragMode::Pan => {
                self.pan.x += delta.x * self.settings.pan_sensitivity;
                self.pan.y -= delta.y * self.settings.pan_sensitivity;
            }
        }
    }

    /// Wheel zoom; positive steps move closer. Cancels tracking.
    pub fn zoom(&mut self, steps: f32) {
        self.mode = CameraMode::Manual;
        self.set_distance(self.distance - steps * self.settings.zoom_step);
    }

    /// Multiplicative zoom; factors below 1 move closer. Cancels tracking.
    pub fn zoom_by_factor(&mut self, factor: f32) {
        self.mode = CameraMode::Manual;
        self.set_distance(self.distance * factor);
    }

    pub fn apply_preset(&mut self, preset: ViewPreset) {
        let (yaw, height) = preset.pose();
        self.mode = CameraMode::Manual;
        self.yaw = yaw;
        self.height = height;
        self.pan = Vec2::ZERO;
        self.set_distance(PRESET_DISTANCE);
    }

    /// Frame `target` immediately and start tracking it.
    pub fn select_target(&mut self, id: BodyId, target: &TrackTarget) {
        match target.kind {
            BodyKind::Star => {
                let reach = target.radius * self.settings.zoom_base;
                self.yaw = STAR_YAW_DEG;
                self.height = target.radius * self.settings.height_factor;
                self.pan = target.position - Vec2::new(0.0, reach * STAR_PULLBACK_SCALE);
                self.set_distance(reach * STAR_DISTANCE_SCALE);
            }
            BodyKind::Planet | BodyKind::Moon => {
                let framing = self.framing(target);
                self.yaw = framing.yaw;
                self.height = framing.height;
                self.pan = framing.pan;
                self.set_distance(framing.distance);
            }
        }
        self.mode = CameraMode::Tracking(id);
    }

    /// Move toward the tracked body's live framing. `dt` of zero is a no-op.
    pub fn tick(&mut self, dt: f32, system: &SolarSystem) {
        let CameraMode::Tracking(id) = self.mode else {
            return;
        };
        let Some(target) = system.track_target(id) else {
            warn!("Tracked body {:?} no longer exists, switching to manual", id);
            self.mode = CameraMode::Manual;
            return;
        };
        // Stars sit still; the selection frame holds.
        if target.kind == BodyKind::Star {
            return;
        }

        let t = smoothing_step(self.settings.smoothing, dt);
        if t <= 0.0 {
            return;
        }

        let framing = self.framing(&target);
        self.pan += (framing.pan - self.pan) * t;
        self.yaw += shortest_arc_deg(self.yaw, framing.yaw) * t;
        self.height += (framing.height - self.height) * t;
        if self.settings.retarget_distance {
            self.set_distance(self.distance + (framing.distance - self.distance) * t);
        }
    }

    pub fn view_parameters(&self) -> ViewParameters {
        let yaw = self.yaw.to_radians();
        let target = Vec3::new(self.pan.x, 0.0, self.pan.y);
        let eye = target
            + Vec3::new(
                yaw.sin() * self.distance,
                self.height,
                yaw.cos() * self.distance,
            );
        ViewParameters {
            eye,
            target,
            up: Vec3::Y,
        }
    }

    fn set_distance(&mut self, distance: f32) {
        // f32::max discards NaN
        self.distance = distance.max(self.settings.min_distance);
    }

    fn framing(&self, target: &TrackTarget) -> Framing {
        let pan = target.position * self.settings.damping;
        let gap = target.position - pan;
        let height = target.radius * self.settings.height_factor;
        Framing {
            pan,
            yaw: gap.x.atan2(gap.y).to_degrees(),
            height,
            distance: framing_distance(
                target.radius * self.settings.zoom_base,
                gap.length(),
                height,
            ),
        }
    }
}

#[cfg(test)]
impl CameraRig {
    pub(crate) fn mode(&self) -> CameraMode {
        self.mode
    }

    pub(crate) fn distance(&self) -> f32 {
        self.distance
    }

    /// Yaw in degrees
    pub(crate) fn yaw(&self) -> f32 {
        self.yaw
    }

    pub(crate) fn height(&self) -> f32 {
        self.height
    }

    /// Look-at point on the orbital plane, as (x, z)
    pub(crate) fn pan(&self) -> Vec2 {
        self.pan
    }
}

/// Smallest reach, at least `base`, that keeps a body `gap` away from the
/// look-at point in front of the eye and no farther from the eye than the
/// reach itself.
fn framing_distance(base: f32, gap: f32, height: f32) -> f32 {
    if gap > 0.0 {
        base.max(gap + (gap * gap + height * height) / (2.0 * gap))
    } else {
        base
    }
}

/// Frame-rate independent exponential smoothing factor.
fn smoothing_step(smoothing: f32, dt: f32) -> f32 {
    1.0 - (1.0 - smoothing).powf(dt.max(0.0) * REFERENCE_FRAME_RATE)
}

/// Signed difference `to - from` in (-180, 180].
fn shortest_arc_deg(from: f32, to: f32) -> f32 {
    let diff = (to - from).rem_euclid(360.0);
    if diff > 180.0 { diff - 360.0 } else { diff }
}
