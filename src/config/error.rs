//! Configuration validation errors

use thiserror::Error;

/// A static configuration value that violates the body table or camera invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("body name must not be empty")]
    EmptyName,
    #[error("body name {0:?} is used more than once")]
    DuplicateName(String),
    #[error("{body}: {field} must be finite, got {value}")]
    NonFinite {
        body: String,
        field: &'static str,
        value: f64,
    },
    #[error("{body}: {field} {period} is too short to animate")]
    PeriodTooShort {
        body: String,
        field: &'static str,
        period: f64,
    },
    #[error("{body}: radius must be positive, got {radius}")]
    NonPositiveRadius { body: String, radius: f32 },
    #[error("{body}: orbit distance must not be negative, got {distance}")]
    NegativeDistance { body: String, distance: f32 },
    #[error("root body {body} must sit at distance 0, got {distance}")]
    RootNotCentered { body: String, distance: f32 },
    #[error("{body}: ring band {inner}..{outer} must satisfy 0 <= inner < outer")]
    InvalidRing { body: String, inner: f32, outer: f32 },
    #[error("camera {field} must be finite, got {value}")]
    CameraNonFinite { field: &'static str, value: f32 },
    #[error("camera min_distance must be positive, got {0}")]
    NonPositiveMinDistance(f32),
    #[error("camera smoothing must lie in [0, 1), got {0}")]
    SmoothingOutOfRange(f32),
    #[error("camera damping must lie in [0, 1], got {0}")]
    DampingOutOfRange(f32),
    #[error("time scale {field} must be finite and non-negative, got {value}")]
    InvalidTimeScale { field: &'static str, value: f32 },
    #[error("skybox brightness must be finite and non-negative, got {0}")]
    InvalidSkyboxBrightness(f32),
}
