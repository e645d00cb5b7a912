//! Time management for the body kinematics

use bevy::prelude::*;

use crate::config::TimeSettings;
use crate::orbital::SolarSystem;

/// Frame rate the per-step kinematics were tuned at.
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

/// Simulation clock resource
#[derive(Resource, Debug, Clone)]
pub struct SimulationClock {
    pub time_scale: f32,
    pub resume_time_scale: f32,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::from_settings(&TimeSettings::default())
    }
}

impl SimulationClock {
    pub fn from_settings(settings: &TimeSettings) -> Self {
        Self {
            time_scale: settings.initial_time_scale,
            resume_time_scale: settings.resume_time_scale,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.time_scale <= 0.0
    }

    /// Stop the clock when running, otherwise resume at the configured scale.
    pub fn toggle_pause(&mut self) {
        self.time_scale = if self.is_paused() {
            self.resume_time_scale
        } else {
            0.0
        };
    }

    /// Step passed to `advance` for a frame of `delta_secs`; one reference
    /// frame at time scale 1 is one step.
    pub fn frame_scale(&self, delta_secs: f32) -> f64 {
        (self.time_scale.max(0.0) * delta_secs * REFERENCE_FRAME_RATE) as f64
    }
}

/// System to advance every body by the scaled frame time
pub fn advance_bodies(
    time: Res<Time>,
    clock: Res<SimulationClock>,
    mut system: ResMut<SolarSystem>,
) {
    let step = clock.frame_scale(time.delta_secs());
    if step == 0.0 {
        return;
    }
    system.advance(step);
}
