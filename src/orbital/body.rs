//! Kinematic state of a single celestial body and its satellites

use bevy::prelude::*;

use crate::config::{BodyConfig, RingConfig};

/// Visualization speed divisor applied to every period.
///
/// Not a physical constant: it only stretches the configured periods so the
/// default table animates at a watchable pace.
pub const PERIOD_SPEED_DIVISOR: f64 = 10.0;

/// Role of a body in the tree, fixed at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

impl BodyKind {
    fn from_depth(depth: usize) -> Self {
        match depth {
            0 => BodyKind::Star,
            1 => BodyKind::Planet,
            _ => BodyKind::Moon,
        }
    }

    pub fn is_light_source(self) -> bool {
        self == BodyKind::Star
    }
}

/// One celestial body: static configuration, accumulated angles and the
/// satellites it owns.
#[derive(Debug, Clone)]
pub struct OrbitalBody {
    name: String,
    kind: BodyKind,
    distance: f32,
    orbital_period: f64,
    rotation_period: f64,
    radius: f32,
    color: [f32; 3],
    texture: Option<String>,
    rings: Vec<RingConfig>,
    // Degrees, unbounded; normalized on read
    orbit_angle: f64,
    rotation_angle: f64,
    satellites: Vec<OrbitalBody>,
}

impl OrbitalBody {
    /// Build a body and its satellites from an already validated table.
    ///
    /// `initial_orbit_angle` is called once per body in depth-first order.
    pub(crate) fn from_config(
        config: &BodyConfig,
        depth: usize,
        initial_orbit_angle: &mut impl FnMut() -> f64,
    ) -> Self {
        let orbit_angle = initial_orbit_angle();
        let satellites = config
            .satellites
            .iter()
            .map(|sat| OrbitalBody::from_config(sat, depth + 1, initial_orbit_angle))
            .collect();

        Self {
            name: config.name.clone(),
            kind: BodyKind::from_depth(depth),
            distance: config.distance,
            orbital_period: config.orbital_period,
            rotation_period: config.rotation_period,
            radius: config.radius,
            color: config.color,
            texture: config.texture.clone(),
            rings: config.rings.clone(),
            orbit_angle,
            rotation_angle: 0.0,
            satellites,
        }
    }

    /// Advance orbit and spin by one step of `time_scale`, then every satellite
    /// by the same step. Shorter periods turn faster; a non-positive period
    /// freezes the corresponding angle.
    pub fn advance(&mut self, time_scale: f64) {
        if let Some(rate) = degrees_per_step(self.orbital_period) {
            self.orbit_angle += rate * time_scale;
        }
        if let Some(rate) = degrees_per_step(self.rotation_period) {
            self.rotation_angle += rate * time_scale;
        }
        for satellite in &mut self.satellites {
            satellite.advance(time_scale);
        }
    }

    /// Position on the orbital plane relative to the parent, as (x, z).
    pub fn current_planar_position(&self) -> Vec2 {
        let angle = self.orbit_angle_normalized().to_radians();
        let distance = self.distance as f64;
        Vec2::new(
            (distance * angle.cos()) as f32,
            (distance * angle.sin()) as f32,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    pub fn rings(&self) -> &[RingConfig] {
        &self.rings
    }

    pub fn satellites(&self) -> &[OrbitalBody] {
        &self.satellites
    }

    /// Accumulated orbit angle, unbounded.
    #[cfg(test)]
    pub(crate) fn orbit_angle(&self) -> f64 {
        self.orbit_angle
    }

    /// Accumulated orbit angle, in [0, 360).
    pub fn orbit_angle_normalized(&self) -> f64 {
        normalize_deg(self.orbit_angle)
    }

    /// Accumulated spin angle, in [0, 360).
    pub fn rotation_angle_normalized(&self) -> f64 {
        normalize_deg(self.rotation_angle)
    }

    #[cfg(test)]
    pub(crate) fn set_orbit_angle(&mut self, degrees: f64) {
        self.orbit_angle = degrees;
    }

    #[cfg(test)]
    pub(crate) fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }
}

/// Angle gained per unit step for `period`; `None` when the body holds still.
pub(crate) fn degrees_per_step(period: f64) -> Option<f64> {
    (period > 0.0).then(|| 360.0 / (period * PERIOD_SPEED_DIVISOR))
}

fn normalize_deg(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}
